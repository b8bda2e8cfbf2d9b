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

//! Single signer ed25519, the building block of collective signing.

use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
use sha2::{Digest, Sha512};
use std::fmt::Debug;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::errors::CosiError;
use crate::keys::{Keypair, PublicKey};
use crate::tools;

/// The length of an ed25519 `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An ed25519 signature.
///
/// # Note
///
/// These signatures are "detached", that is, they do **not** include a copy
/// of the message which has been signed.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is the compressed commitment `r·B`, where `r` is derived
    /// from the nonce prefix of the expanded secret key and the message.
    pub(crate) R: CompressedEdwardsY,

    /// `s = r + c·a`, where `c = H(R, A, M)` and `a` is the secret scalar.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

/// Parse a 32 byte response scalar, rejecting the high bits ed25519
/// never produces and any non-canonical encoding.
pub(crate) fn check_scalar(bytes: [u8; 32]) -> Result<Scalar, CosiError> {
    if bytes[31] & 224 != 0 {
        return Err(CosiError::ScalarFormatError);
    }
    Option::from(Scalar::from_canonical_bytes(bytes)).ok_or(CosiError::ScalarFormatError)
}

impl Signature {
    const DESCRIPTION: &'static str = "An ed25519 signature as 64 bytes, R then s.";

    /// Sign `message` deterministically, as RFC 8032 does.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::rngs::OsRng;
    /// use cosi::*;
    ///
    /// let keypair: Keypair = Keypair::generate(&mut OsRng);
    /// let message: &[u8] = b"All I want is to pet all of the dogs.";
    ///
    /// let sig: Signature = Signature::sign(&keypair, message);
    ///
    /// assert!(sig.verify(message, &keypair.public).is_ok());
    /// ```
    #[allow(non_snake_case)]
    pub fn sign(keypair: &Keypair, message: &[u8]) -> Signature {
        let expanded = keypair.secret.expand();

        // r = H(prefix || M)
        let mut h = Sha512::new();
        h.update(&expanded.nonce);
        h.update(message);
        let mut r = tools::reduce_wide(&tools::sha512(h));

        let R = EdwardsPoint::mul_base(&r).compress();
        let c = tools::challenge(&R, keypair.public.as_compressed(), message);

        // s = r + c·a
        let s = r + c * expanded.scalar();

        r.zeroize();

        Signature { R, s }
    }

    /// Verify this signature on `message` under `public_key`.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if the signature is valid, and `Err(VerifyError)` otherwise.
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], public_key: &PublicKey) -> Result<(), CosiError> {
        let c = tools::challenge(&self.R, public_key.as_compressed(), message);

        // R' = c·(-A) + s·B
        let minus_A = -public_key.as_point();
        let R = EdwardsPoint::vartime_double_scalar_mul_basepoint(&c, &minus_A, &self.s).compress();

        if R.as_bytes().ct_eq(self.R.as_bytes()).into() {
            Ok(())
        } else {
            Err(CosiError::VerifyError)
        }
    }

    /// Convert this signature to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(self.R.as_bytes());
        bytes[32..].copy_from_slice(self.s.as_bytes());
        bytes
    }

    /// Construct a `Signature` from a slice of bytes.
    ///
    /// The commitment `R` is kept compressed; it only ever gets compared
    /// against a recomputed encoding.
    #[allow(non_snake_case)]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, CosiError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CosiError::BytesLengthError {
                name: "Signature",
                description: Signature::DESCRIPTION,
                length: SIGNATURE_LENGTH,
            });
        }

        let mut R = [0u8; 32];
        let mut s = [0u8; 32];
        R.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(Signature {
            R: CompressedEdwardsY(R),
            s: check_scalar(s)?,
        })
    }
}

serde_boilerplate!(Signature);

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use crate::{CosiError, Keypair, SecretKey, Signature, SIGNATURE_LENGTH};

    #[test]
    fn rfc8032_test_vector_1() {
        let seed = hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60").unwrap();
        let keypair = Keypair::from(SecretKey::from_bytes(&seed).unwrap());

        let sig = Signature::sign(&keypair, b"");

        assert_eq!(
            hex::encode(&sig.to_bytes()[..]),
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
        assert!(sig.verify(b"", &keypair.public).is_ok());
    }

    #[test]
    fn sign_verify_bytes() {
        let mut csprng = ChaChaRng::from_seed([0u8; 32]);
        let keypair = Keypair::generate(&mut csprng);

        let good: &[u8] = b"test message";
        let bad: &[u8] = b"wrong message";

        let good_sig = Signature::sign(&keypair, good);
        let bad_sig = Signature::sign(&keypair, bad);

        assert!(
            good_sig.verify(good, &keypair.public).is_ok(),
            "Verification of a valid signature failed!"
        );
        assert!(
            bad_sig.verify(good, &keypair.public).is_err(),
            "Verification of a signature on a different message passed!"
        );
        assert!(
            good_sig.verify(bad, &keypair.public).is_err(),
            "Verification of a signature on a different message passed!"
        );
    }

    #[test]
    fn every_single_bit_flip_fails() {
        let mut csprng = ChaChaRng::from_seed([5u8; 32]);
        let keypair = Keypair::generate(&mut csprng);
        let message = b"flip me".to_vec();
        let bytes = Signature::sign(&keypair, &message).to_bytes();

        for bit in 0..SIGNATURE_LENGTH * 8 {
            let mut flipped = bytes;
            flipped[bit / 8] ^= 1 << (bit % 8);
            let accepted = Signature::from_bytes(&flipped)
                .map(|sig| sig.verify(&message, &keypair.public).is_ok())
                .unwrap_or(false);
            assert!(!accepted, "flipped signature bit {} verified", bit);
        }

        let sig = Signature::from_bytes(&bytes).unwrap();
        for bit in 0..message.len() * 8 {
            let mut flipped = message.clone();
            flipped[bit / 8] ^= 1 << (bit % 8);
            assert!(sig.verify(&flipped, &keypair.public).is_err());
        }
    }

    #[test]
    fn high_bits_are_rejected() {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[63] = 0x20;
        assert_eq!(Signature::from_bytes(&bytes).unwrap_err(), CosiError::ScalarFormatError);
        assert!(Signature::from_bytes(&bytes[..63]).is_err());
    }
}
