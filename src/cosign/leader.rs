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

//! The leader's side of a signing round: collecting commitments and
//! signature parts into a collective signature.

use super::commitment::{AggregateCommitment, Commitment};
use super::signature::{CollectiveSignature, SignaturePart};
use crate::cosigners::Cosigners;
use crate::mask::{mask_len, position, MaskBit};
use crate::CosiError;
use curve25519_dalek::{edwards::EdwardsPoint, scalar::Scalar, traits::Identity};
use subtle::ConstantTimeEq;
use tracing::debug;

impl Cosigners {
    /// Stage 3: combine the commitments of the cosigners that answered.
    ///
    /// `commits` has one slot per cosigner in roster order; `None` marks a
    /// cosigner that is offline or unwilling. The participation mask is set
    /// to exactly the answering cosigners and must not change until
    /// [`Cosigners::aggregate_signature`] has run.
    #[allow(non_snake_case)]
    pub fn aggregate_commit(
        &mut self,
        commits: &[Option<Commitment>],
    ) -> Result<AggregateCommitment, CosiError> {
        if commits.len() != self.count_total() {
            return Err(CosiError::BytesLengthError {
                name: "commitments",
                description: "One commitment slot per cosigner",
                length: self.count_total(),
            });
        }

        let mut mask = vec![0u8; mask_len(commits.len())];
        let mut R = EdwardsPoint::identity();
        for (index, commit) in commits.iter().enumerate() {
            match commit {
                Some(commit) => R += commit.as_point(),
                None => {
                    let (byte, bit) = position(index);
                    mask[byte] |= bit;
                }
            }
        }
        self.set_mask(&mask);

        Ok(AggregateCommitment {
            R: R.compress(),
            A: *self.aggregate_public_key().as_compressed(),
            mask,
        })
    }

    /// Check one cosigner's signature part: `s_i·B == R_i + c·A_i`.
    ///
    /// Lets the leader single out a faulty cosigner instead of only
    /// learning that the collective signature failed.
    ///
    /// # Panics
    ///
    /// If `signer` is not a position in the roster.
    #[allow(non_snake_case)]
    pub fn verify_part(
        &self,
        signer: usize,
        commit: &Commitment,
        challenge: &Scalar,
        part: &SignaturePart,
    ) -> Result<(), CosiError> {
        let minus_A = -self.key(signer).as_point();
        let R = EdwardsPoint::vartime_double_scalar_mul_basepoint(challenge, &minus_A, &part.0).compress();

        if R.as_bytes().ct_eq(&commit.to_bytes()).into() {
            Ok(())
        } else {
            debug!(signer, "invalid signature part");
            Err(CosiError::InvalidPart { signer })
        }
    }

    /// Stage 5: sum the signature parts into a collective signature.
    ///
    /// `parts` has one slot per cosigner. The mask must still be the one
    /// frozen in `aggregate`, and exactly the enabled cosigners must have
    /// a part, otherwise the result is `MaskMismatch`.
    ///
    /// Parts are not checked individually; use [`Cosigners::verify_part`]
    /// for that.
    #[allow(non_snake_case)]
    pub fn aggregate_signature(
        &self,
        aggregate: &AggregateCommitment,
        parts: &[Option<SignaturePart>],
    ) -> Result<CollectiveSignature, CosiError> {
        if parts.len() != self.count_total() {
            return Err(CosiError::BytesLengthError {
                name: "signature parts",
                description: "One signature part slot per cosigner",
                length: self.count_total(),
            });
        }
        if self.mask() != aggregate.mask() {
            debug!("participation mask changed since the commitments were aggregated");
            return Err(CosiError::MaskMismatch);
        }

        let mut S = Scalar::ZERO;
        for (index, part) in parts.iter().enumerate() {
            match (part, self.mask_bit(index)) {
                (Some(part), MaskBit::Enabled) => S += part.0,
                (None, MaskBit::Disabled) => {}
                _ => {
                    debug!(index, "signature parts do not match the participation mask");
                    return Err(CosiError::MaskMismatch);
                }
            }
        }

        Ok(CollectiveSignature {
            R: aggregate.R,
            S,
            mask: aggregate.mask.clone(),
        })
    }
}
