// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Collective signature verification

use crate::cosign::CollectiveSignature;
use crate::cosigners::Cosigners;
use crate::mask::padding_is_clear;
use crate::signature::SIGNATURE_LENGTH;
use crate::tools;
use curve25519_dalek::edwards::EdwardsPoint;
use subtle::ConstantTimeEq;
use tracing::debug;

impl Cosigners {
    /// Verify an encoded collective signature `R || S || mask` on `message`.
    ///
    /// Accepts only if the signature is cryptographically valid for the
    /// cosigners its mask names *and* the group's policy accepts that set
    /// of cosigners.
    ///
    /// A malformed signature (wrong length, set padding bits, an out of
    /// range `S`) is rejected without touching the group. Otherwise the
    /// group's mask and aggregate key are left as the signature claims,
    /// whatever the outcome.
    pub fn verify(&mut self, message: &[u8], signature: &[u8]) -> bool {
        let expected = SIGNATURE_LENGTH + self.mask_len();
        if signature.len() != expected {
            debug!(
                length = signature.len(),
                expected, "collective signature has the wrong length"
            );
            return false;
        }

        match CollectiveSignature::from_bytes(signature) {
            Ok(signature) => self.verify_signature(message, &signature),
            Err(e) => {
                debug!(error = %e, "malformed collective signature");
                false
            }
        }
    }

    /// Verify a decoded collective signature on `message`.
    ///
    /// Same as [`Cosigners::verify`], including the side effect on the mask.
    #[allow(non_snake_case)]
    pub fn verify_signature(&mut self, message: &[u8], signature: &CollectiveSignature) -> bool {
        if signature.mask.len() != self.mask_len() {
            debug!(
                length = signature.mask.len(),
                expected = self.mask_len(),
                "participation mask has the wrong length"
            );
            return false;
        }
        if !padding_is_clear(&signature.mask, self.count_total()) {
            debug!("participation mask sets bits past the roster");
            return false;
        }

        self.set_mask(&signature.mask);

        let A = self.aggregate_public_key();
        let c = tools::challenge(&signature.R, A.as_compressed(), message);

        // R' = c·(-A) + S·B
        let minus_A = -A.as_point();
        let R = EdwardsPoint::vartime_double_scalar_mul_basepoint(&c, &minus_A, &signature.S).compress();

        let valid: bool = R.as_bytes().ct_eq(signature.R.as_bytes()).into();
        if !valid {
            debug!("collective signature does not verify");
            return false;
        }

        let accepted = self.policy().check(self.count_enabled(), self.count_total(), self);
        if !accepted {
            debug!(
                enabled = self.count_enabled(),
                total = self.count_total(),
                "policy rejects the set of cosigners"
            );
        }
        accepted
    }
}
