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

//! The Extra Sauce
//!
//! Hashing into scalars. Every challenge in this crate, single-signer or
//! collective, goes through [`challenge`], so signing and verification
//! agree on the hash input bit for bit:
//!
//! ```text
//! c = SHA-512( R || A || M ) mod L
//! ```
//!
//! where `R` is the 32 byte (aggregate) commitment, `A` the 32 byte
//! (aggregate) public key and `M` the raw message. This is the Ed25519
//! `H(R, A, M)`, which makes a one member collective signature an
//! ordinary Ed25519 signature.

use curve25519_dalek::{edwards::CompressedEdwardsY, scalar::Scalar};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

/// Reduce a 64 byte digest modulo the group order.
pub fn reduce_wide(digest: &[u8; 64]) -> Scalar {
    Scalar::from_bytes_mod_order_wide(digest)
}

/// Compute the challenge scalar `c = H(R || A || M)`.
#[allow(non_snake_case)]
pub fn challenge(R: &CompressedEdwardsY, A: &CompressedEdwardsY, message: &[u8]) -> Scalar {
    let mut h = Sha512::new();
    h.update(R.as_bytes());
    h.update(A.as_bytes());
    h.update(message);

    reduce_wide(&sha512(h))
}

/// Finish a SHA-512 computation into a plain array.
pub(crate) fn sha512(h: Sha512) -> [u8; 64] {
    let mut digest = [0u8; 64];
    digest.copy_from_slice(h.finalize().as_slice());
    digest
}

/// Draw a uniformly random scalar from 64 bytes of `csprng` output.
///
/// Used for collective signing nonces, which must never be derived from
/// the message alone.
pub fn random_scalar<R>(csprng: &mut R) -> Scalar
where
    R: CryptoRng + RngCore,
{
    let mut wide = [0u8; 64];
    csprng.fill_bytes(&mut wide);
    let r = reduce_wide(&wide);
    wide.zeroize();
    r
}
