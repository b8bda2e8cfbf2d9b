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

//! Commitments used in the first stage of collective signing

use crate::keys::PublicKey;
use crate::tools;
use crate::CosiError;
use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
use rand::{CryptoRng, RngCore};
use std::fmt::Debug;
use zeroize::Zeroize;

/// The length of a `Commitment`, in bytes.
pub const COMMITMENT_LENGTH: usize = 32;

/// A cosigner's public commitment `R_i = r_i·B`, sent to the leader.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Commitment(pub(crate) PublicKey);

impl Debug for Commitment {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Commitment( {:?} )", self.0.as_compressed())
    }
}

impl Commitment {
    const DESCRIPTION: &'static str = "A collective signing commitment as a 32-byte compressed point";

    /// Access the point form
    pub fn as_point(&self) -> &EdwardsPoint {
        self.0.as_point()
    }

    /// Convert this commitment to a byte array.
    pub fn to_bytes(&self) -> [u8; COMMITMENT_LENGTH] {
        self.0.to_bytes()
    }

    /// Construct a `Commitment` from a slice of bytes, rejecting anything
    /// that is not a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Commitment, CosiError> {
        if bytes.len() != COMMITMENT_LENGTH {
            return Err(CosiError::BytesLengthError {
                name: "Commitment",
                description: Commitment::DESCRIPTION,
                length: COMMITMENT_LENGTH,
            });
        }
        Ok(Commitment(PublicKey::from_bytes(bytes)?))
    }
}

serde_boilerplate!(Commitment);

/// The secret nonce `r_i` behind a [`Commitment`].
///
/// A `Secret` answers exactly one challenge: [`cosign`](crate::cosign::cosign)
/// takes it by value, and it is neither `Clone` nor `Copy`. The nonce is
/// overwritten when the value is dropped, used or not.
pub struct Secret {
    pub(crate) nonce: Scalar,
}

impl Debug for Secret {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Secret: <redacted>")
    }
}

impl Zeroize for Secret {
    fn zeroize(&mut self) {
        self.nonce.zeroize();
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Stage 2: draw a fresh nonce from `csprng` and commit to it.
///
/// The nonce comes from the random source alone. Deterministic,
/// message-derived nonces as in single-signer ed25519 are unsafe here:
/// a cosigner answering two challenges with the same nonce leaks its key,
/// and the challenge depends on the other cosigners' commitments.
///
/// # Example
///
/// ```
/// use rand::rngs::OsRng;
/// use cosi::cosign;
///
/// let (commitment, secret) = cosign::commit(&mut OsRng);
/// # let _ = (commitment, secret);
/// ```
pub fn commit<R>(csprng: &mut R) -> (Commitment, Secret)
where
    R: CryptoRng + RngCore,
{
    let nonce = tools::random_scalar(csprng);
    let commitment = Commitment(PublicKey::from_point(EdwardsPoint::mul_base(&nonce)));
    (commitment, Secret { nonce })
}

/// Stage 3 output: what the leader broadcasts back to the cosigners.
///
/// Carries the sum `R` of the willing cosigners' commitments, the
/// aggregate public key `A` of exactly those cosigners, and the mask
/// that selected them. The mask must stay frozen until the signature
/// parts are aggregated.
#[allow(non_snake_case)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateCommitment {
    pub(crate) R: CompressedEdwardsY,
    pub(crate) A: CompressedEdwardsY,
    pub(crate) mask: Vec<u8>,
}

impl AggregateCommitment {
    const DESCRIPTION: &'static str = "An aggregate commitment as R (32 bytes), A (32 bytes) and a participation mask";

    /// The aggregate commitment `R`.
    pub fn commitment(&self) -> &CompressedEdwardsY {
        &self.R
    }

    /// The aggregate public key `A` of the participating cosigners.
    pub fn aggregate_public_key(&self) -> &CompressedEdwardsY {
        &self.A
    }

    /// The participation mask frozen for this round.
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// The round challenge `c = H(R || A || M)` for `message`.
    pub fn challenge(&self, message: &[u8]) -> Scalar {
        tools::challenge(&self.R, &self.A, message)
    }

    /// `R || A || mask`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(64 + self.mask.len());
        bytes.extend_from_slice(self.R.as_bytes());
        bytes.extend_from_slice(self.A.as_bytes());
        bytes.extend_from_slice(&self.mask);
        bytes
    }

    /// Parse `R || A || mask`; everything after the first 64 bytes is the mask.
    #[allow(non_snake_case)]
    pub fn from_bytes(bytes: &[u8]) -> Result<AggregateCommitment, CosiError> {
        if bytes.len() < 64 {
            return Err(CosiError::BytesLengthError {
                name: "AggregateCommitment",
                description: AggregateCommitment::DESCRIPTION,
                length: 64,
            });
        }
        let mut R = [0u8; 32];
        let mut A = [0u8; 32];
        R.copy_from_slice(&bytes[..32]);
        A.copy_from_slice(&bytes[32..64]);

        Ok(AggregateCommitment {
            R: CompressedEdwardsY(R),
            A: CompressedEdwardsY(A),
            mask: bytes[64..].to_vec(),
        })
    }
}

serde_boilerplate!(AggregateCommitment);
