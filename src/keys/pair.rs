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

//! Ed25519 key generation, and the 64 byte private key format

use crate::keys::{PublicKey, SecretKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use crate::CosiError;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// The length of an ed25519 `Keypair`, in bytes.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// An Ed25519 keypair. Its byte form is the usual 64 byte ed25519
/// private key: the seed followed by the public key.
#[derive(Debug, Default, Clone)]
pub struct Keypair {
    /// The secret half of this keypair.
    pub secret: SecretKey,
    /// The public half of this keypair.
    pub public: PublicKey,
}

impl From<SecretKey> for Keypair {
    fn from(secret: SecretKey) -> Keypair {
        let public = PublicKey::from_secret(&secret);
        Keypair { secret, public }
    }
}

impl Zeroize for Keypair {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Keypair {
    const DESCRIPTION: &'static str = "An ed25519 private key as 64 bytes: seed then public key.";

    /// Convert this keypair to bytes.
    ///
    /// # Returns
    ///
    /// An array of bytes, `[u8; KEYPAIR_LENGTH]`.  The first
    /// `SECRET_KEY_LENGTH` of bytes is the `SecretKey`, and the next
    /// `PUBLIC_KEY_LENGTH` bytes is the `PublicKey`
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes: [u8; KEYPAIR_LENGTH] = [0u8; KEYPAIR_LENGTH];

        bytes[..SECRET_KEY_LENGTH].copy_from_slice(self.secret.as_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.public.as_bytes());
        bytes
    }

    /// Construct a `Keypair` from the bytes of a `SecretKey` and `PublicKey`.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `Keypair` or whose error value
    /// is a `CosiError`: `BytesLengthError` for anything but 64 bytes,
    /// `MismatchedKeypair` when the public half was not derived from the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, CosiError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(CosiError::BytesLengthError {
                name: "Keypair",
                description: Keypair::DESCRIPTION,
                length: KEYPAIR_LENGTH,
            });
        }
        let secret = SecretKey::from_bytes(&bytes[..SECRET_KEY_LENGTH])?;
        let public = PublicKey::from_bytes(&bytes[SECRET_KEY_LENGTH..])?;

        if PublicKey::from_secret(&secret) != public {
            return Err(CosiError::MismatchedKeypair);
        }

        Ok(Keypair { secret, public })
    }

    /// Generate an ed25519 keypair.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::rngs::OsRng;
    /// use cosi::*;
    ///
    /// let keypair: Keypair = Keypair::generate(&mut OsRng);
    /// ```
    ///
    /// # Input
    ///
    /// A CSPRNG with a `fill_bytes()` method, e.g. `rand_chacha::ChaChaRng`.
    pub fn generate<R>(csprng: &mut R) -> Keypair
    where
        R: CryptoRng + RngCore,
    {
        Keypair::from(SecretKey::generate(csprng))
    }
}

serde_boilerplate!(Keypair);

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn keypair_bytes_roundtrip() {
        let keypair = Keypair::generate(&mut ChaChaRng::from_seed([1u8; 32]));
        let decoded = Keypair::from_bytes(&keypair.to_bytes()).unwrap();

        assert_eq!(decoded.secret, keypair.secret);
        assert_eq!(decoded.public, keypair.public);
    }

    #[test]
    fn keypair_rejects_foreign_public_key() {
        let mut csprng = ChaChaRng::from_seed([1u8; 32]);
        let a = Keypair::generate(&mut csprng);
        let b = Keypair::generate(&mut csprng);

        let mut bytes = a.to_bytes();
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(b.public.as_bytes());

        assert_eq!(Keypair::from_bytes(&bytes).unwrap_err(), CosiError::MismatchedKeypair);
        assert!(Keypair::from_bytes(&bytes[..63]).is_err());
    }

    #[test]
    fn keypair_clear_on_zeroize() {
        let mut keypair = Keypair::generate(&mut ChaChaRng::from_seed([9u8; 32]));
        keypair.zeroize();

        assert_eq!(keypair.secret.to_bytes(), [0u8; SECRET_KEY_LENGTH]);
    }
}
