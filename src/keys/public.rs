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

//! Ed25519 Public Keys

use crate::keys::SecretKey;
use crate::CosiError;
use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    traits::Identity,
};
use std::fmt::Debug;
use subtle::ConstantTimeEq;

/// The length of an ed25519 `PublicKey`, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// An Ed25519 public key.
///
/// Keeps the compressed wire form next to the decoded point, so a key is
/// decompressed exactly once, when it is parsed.
#[derive(Copy, Clone)]
pub struct PublicKey {
    pub(crate) compressed: CompressedEdwardsY,
    pub(crate) point: EdwardsPoint,
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "PublicKey( CompressedEdwardsY( {:?} ))", self.compressed)
    }
}

impl Default for PublicKey {
    /// The identity point, i.e. the aggregate of nobody.
    fn default() -> PublicKey {
        PublicKey::from_point(EdwardsPoint::identity())
    }
}

impl PublicKey {
    const DESCRIPTION: &'static str = "An ed25519 public key as a 32-byte compressed point";

    /// Access the compressed Edwards form
    pub fn as_compressed(&self) -> &CompressedEdwardsY {
        &self.compressed
    }

    /// Access the point form
    pub fn as_point(&self) -> &EdwardsPoint {
        &self.point
    }

    /// Extract the point form
    pub fn into_point(self) -> EdwardsPoint {
        self.point
    }

    /// Compress into the `PublicKey` format that also retains the
    /// uncompressed form.
    pub fn from_point(point: EdwardsPoint) -> PublicKey {
        PublicKey {
            compressed: point.compress(),
            point,
        }
    }

    /// Decompress into the `PublicKey` format that also retains the
    /// compressed form.
    pub fn from_compressed(compressed: CompressedEdwardsY) -> Result<PublicKey, CosiError> {
        let point = compressed
            .decompress()
            .ok_or(CosiError::PointDecompressionError)?;
        Ok(PublicKey { compressed, point })
    }

    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Construct a `PublicKey` from a slice of bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use cosi::*;
    ///
    /// # fn doctest() -> Result<PublicKey, CosiError> {
    /// let public_key_bytes: [u8; PUBLIC_KEY_LENGTH] = [
    ///    215,  90, 152,   1, 130, 177,  10, 183, 213,  75, 254, 211, 201, 100,   7,  58,
    ///     14, 225, 114, 243, 218, 166,  35,  37, 175,   2,  26, 104, 247,   7,  81,  26];
    ///
    /// let public_key = PublicKey::from_bytes(&public_key_bytes)?;
    /// #
    /// # Ok(public_key)
    /// # }
    /// #
    /// # fn main() {
    /// #     assert!(doctest().is_ok());
    /// # }
    /// ```
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `PublicKey` or whose error value
    /// is a `CosiError` describing the error that occurred: a
    /// `BytesLengthError` for the wrong length, a `PointDecompressionError`
    /// when the bytes are not a point on the curve.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, CosiError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(CosiError::BytesLengthError {
                name: "PublicKey",
                description: PublicKey::DESCRIPTION,
                length: PUBLIC_KEY_LENGTH,
            });
        }

        let mut bits = [0u8; PUBLIC_KEY_LENGTH];
        bits.copy_from_slice(bytes);
        PublicKey::from_compressed(CompressedEdwardsY(bits))
    }

    /// Derive this public key from its corresponding `SecretKey`.
    pub fn from_secret(secret_key: &SecretKey) -> PublicKey {
        secret_key.expand().public_key()
    }
}

impl From<&SecretKey> for PublicKey {
    fn from(source: &SecretKey) -> PublicKey {
        PublicKey::from_secret(source)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &PublicKey) -> bool {
        self.compressed
            .as_bytes()
            .ct_eq(other.compressed.as_bytes())
            .into()
    }
}

impl Eq for PublicKey {}

serde_boilerplate!(PublicKey);
