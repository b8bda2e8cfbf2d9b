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

//! Signature parts and the collective signature they add up to.

use crate::signature::{check_scalar, SIGNATURE_LENGTH};
use crate::CosiError;
use curve25519_dalek::{edwards::CompressedEdwardsY, scalar::Scalar};
use std::fmt::Debug;

/// The length of a `SignaturePart`, in bytes.
pub const SIGNATURE_PART_LENGTH: usize = 32;

/// One cosigner's response `s_i = r_i + c·a_i`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct SignaturePart(pub(crate) Scalar);

impl Debug for SignaturePart {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "SignaturePart( {:?} )", &self.0)
    }
}

impl SignaturePart {
    const DESCRIPTION: &'static str = "A signature part as a 32-byte canonical scalar";

    /// Convert this part to a byte array.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_PART_LENGTH] {
        self.0.to_bytes()
    }

    /// Construct a `SignaturePart` from a slice of bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<SignaturePart, CosiError> {
        if bytes.len() != SIGNATURE_PART_LENGTH {
            return Err(CosiError::BytesLengthError {
                name: "SignaturePart",
                description: SignaturePart::DESCRIPTION,
                length: SIGNATURE_PART_LENGTH,
            });
        }
        let mut bits = [0u8; SIGNATURE_PART_LENGTH];
        bits.copy_from_slice(bytes);
        Ok(SignaturePart(check_scalar(bits)?))
    }
}

serde_boilerplate!(SignaturePart);

/// A collective signature: aggregate commitment `R`, aggregate response
/// `S`, and the participation mask naming who signed.
///
/// The first 64 bytes are laid out exactly like an ed25519 signature;
/// the mask follows, one bit per cosigner, set for absent cosigners.
#[allow(non_snake_case)]
#[derive(Clone, Eq, PartialEq)]
pub struct CollectiveSignature {
    pub(crate) R: CompressedEdwardsY,
    pub(crate) S: Scalar,
    pub(crate) mask: Vec<u8>,
}

impl Debug for CollectiveSignature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(
            f,
            "CollectiveSignature( R: {:?}, S: {:?}, mask: {:?} )",
            &self.R, &self.S, &self.mask
        )
    }
}

impl CollectiveSignature {
    const DESCRIPTION: &'static str = "A collective signature as R (32 bytes), S (32 bytes) and a participation mask";

    /// The participation mask, bit set for each absent cosigner.
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// `R || S || mask`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH + self.mask.len());
        bytes.extend_from_slice(self.R.as_bytes());
        bytes.extend_from_slice(self.S.as_bytes());
        bytes.extend_from_slice(&self.mask);
        bytes
    }

    /// Parse `R || S || mask`. Everything past the first 64 bytes is
    /// taken as the mask; whether its length fits a roster is checked
    /// at verification.
    #[allow(non_snake_case)]
    pub fn from_bytes(bytes: &[u8]) -> Result<CollectiveSignature, CosiError> {
        if bytes.len() < SIGNATURE_LENGTH {
            return Err(CosiError::BytesLengthError {
                name: "CollectiveSignature",
                description: CollectiveSignature::DESCRIPTION,
                length: SIGNATURE_LENGTH,
            });
        }

        let mut R = [0u8; 32];
        let mut S = [0u8; 32];
        R.copy_from_slice(&bytes[..32]);
        S.copy_from_slice(&bytes[32..SIGNATURE_LENGTH]);

        Ok(CollectiveSignature {
            R: CompressedEdwardsY(R),
            S: check_scalar(S)?,
            mask: bytes[SIGNATURE_LENGTH..].to_vec(),
        })
    }
}

serde_boilerplate!(CollectiveSignature);
