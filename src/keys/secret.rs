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

//! Ed25519 Secret Key & Expanded Secret Key

use crate::keys::PublicKey;
use crate::tools;
use crate::CosiError;
use core::fmt::Debug;
use curve25519_dalek::{edwards::EdwardsPoint, scalar::Scalar};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// The length of an ed25519 `SecretKey` seed, in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// An Ed25519 secret key: the 32 byte seed every other secret is hashed from.
#[derive(Default, Clone)]
pub struct SecretKey(pub(crate) [u8; SECRET_KEY_LENGTH]);

impl Debug for SecretKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "SecretKey: <redacted>")
    }
}

impl Eq for SecretKey {}
impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}
impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Overwrite secret key material with null bytes when it goes out of scope.
impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    const DESCRIPTION: &'static str = "An ed25519 secret key seed as 32 bytes.";

    /// Convert this secret key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0
    }

    /// View this secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Construct a `SecretKey` from a slice of bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use cosi::*;
    ///
    /// # fn doctest() -> Result<SecretKey, CosiError> {
    /// let secret_key_bytes: [u8; SECRET_KEY_LENGTH] = [
    ///    157, 097, 177, 157, 239, 253, 090, 096,
    ///    186, 132, 074, 244, 146, 236, 044, 196,
    ///    068, 073, 197, 105, 123, 050, 105, 025,
    ///    112, 059, 172, 003, 028, 174, 127, 096, ];
    ///
    /// let secret_key: SecretKey = SecretKey::from_bytes(&secret_key_bytes)?;
    /// #
    /// # Ok(secret_key)
    /// # }
    /// #
    /// # fn main() {
    /// #     let result = doctest();
    /// #     assert!(result.is_ok());
    /// # }
    /// ```
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `SecretKey` or whose error value
    /// is a `CosiError::BytesLengthError`.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, CosiError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(CosiError::BytesLengthError {
                name: "SecretKey",
                description: SecretKey::DESCRIPTION,
                length: SECRET_KEY_LENGTH,
            });
        }

        let mut bits = [0u8; SECRET_KEY_LENGTH];
        bits.copy_from_slice(bytes);
        Ok(SecretKey(bits))
    }

    /// Generate a `SecretKey` from a `csprng`.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::rngs::OsRng;
    /// use cosi::*;
    ///
    /// let secret_key: SecretKey = SecretKey::generate(&mut OsRng);
    /// let public_key: PublicKey = PublicKey::from_secret(&secret_key);
    /// ```
    pub fn generate<T>(csprng: &mut T) -> SecretKey
    where
        T: CryptoRng + RngCore,
    {
        let mut bits = [0u8; SECRET_KEY_LENGTH];
        csprng.fill_bytes(&mut bits);
        SecretKey(bits)
    }

    /// Hash the seed into the signing scalar and the nonce prefix.
    pub fn expand(&self) -> ExpandedSecretKey {
        let mut h = Sha512::new();
        h.update(&self.0);
        let mut digest = tools::sha512(h);

        let mut lower = [0u8; 32];
        lower.copy_from_slice(&digest[..32]);
        lower[0] &= 248;
        lower[31] &= 127;
        lower[31] |= 64;

        let mut nonce = [0u8; 32];
        nonce.copy_from_slice(&digest[32..]);

        let key = Scalar::from_bytes_mod_order(lower);
        lower.zeroize();
        digest.zeroize();

        ExpandedSecretKey { key, nonce }
    }
}

serde_boilerplate!(SecretKey);

/// The expanded form of a `SecretKey`: the clamped signing scalar `a` and
/// the prefix used for deterministic single-signer nonces.
///
/// Never serialized; recompute it from the seed.
pub struct ExpandedSecretKey {
    pub(crate) key: Scalar,
    pub(crate) nonce: [u8; 32],
}

impl ExpandedSecretKey {
    /// The signing scalar.
    pub(crate) fn scalar(&self) -> &Scalar {
        &self.key
    }

    /// `a·B`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_point(EdwardsPoint::mul_base(&self.key))
    }
}

impl Zeroize for ExpandedSecretKey {
    fn zeroize(&mut self) {
        self.key.zeroize();
        self.nonce.zeroize();
    }
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expand_matches_rfc8032_public_key() {
        let seed = hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60").unwrap();
        let secret = SecretKey::from_bytes(&seed).unwrap();

        assert_eq!(
            hex::encode(secret.expand().public_key().to_bytes()),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }

    #[test]
    fn secret_key_zeroize() {
        let mut secret = SecretKey([7u8; SECRET_KEY_LENGTH]);
        secret.zeroize();
        assert_eq!(secret.0, [0u8; SECRET_KEY_LENGTH]);
    }
}
