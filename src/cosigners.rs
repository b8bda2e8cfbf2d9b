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

//! A roster of cosigners.
//!
//! `Cosigners` holds an ordered, immutable list of ed25519 public keys,
//! a participation mask over them, and the sum of the public keys of
//! every enabled cosigner. The sum is cached: each flip of a mask bit
//! costs a single point addition or subtraction, never a rescan of the
//! roster, so repeated signing and verification with the same or a
//! similar mask stays cheap even for large rosters.
//!
//! The order of the roster is a convention shared between signers and
//! verifiers and must not change for the lifetime of the group.
//!
//! A `Cosigners` is mutated through `&mut self` and carries no locking
//! of its own; share it between threads behind a `Mutex`.

use crate::keys::PublicKey;
use crate::mask::{self, MaskBit};
use crate::policy::{FullPolicy, Policy};
use crate::CosiError;
use curve25519_dalek::{edwards::EdwardsPoint, traits::Identity};
use std::fmt::Debug;
use tracing::trace;

/// A group of collective signers identified by their public keys.
pub struct Cosigners {
    /// all cosigners' public keys, decoded once
    keys: Vec<PublicKey>,

    /// bit-vector of *disabled* cosigners, byte-packed little-endian
    mask: Vec<u8>,

    /// cached sum of all enabled cosigners' public keys
    aggregate: EdwardsPoint,

    /// cosigner-presence policy for checking signatures
    policy: Box<dyn Policy + Send + Sync>,
}

impl Debug for Cosigners {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        f.debug_struct("Cosigners")
            .field("keys", &self.keys)
            .field("mask", &self.mask)
            .field("aggregate", &self.aggregate.compress())
            .finish()
    }
}

impl Cosigners {
    /// Create a group over `public_keys`.
    ///
    /// Every cosigner starts enabled; `mask`, if given, is then applied
    /// as by [`Cosigners::set_mask`]. The policy is [`FullPolicy`].
    pub fn new(public_keys: Vec<PublicKey>, mask: Option<&[u8]>) -> Cosigners {
        let aggregate = public_keys
            .iter()
            .fold(EdwardsPoint::identity(), |sum, key| sum + key.as_point());

        let mut cosigners = Cosigners {
            mask: vec![0u8; mask::mask_len(public_keys.len())],
            keys: public_keys,
            aggregate,
            policy: Box::new(FullPolicy),
        };

        if let Some(mask) = mask {
            cosigners.set_mask(mask);
        }
        cosigners
    }

    /// Create a group from encoded public keys.
    ///
    /// Decoding stops at the first key that is not a valid point and no
    /// group is built.
    ///
    /// # Example
    ///
    /// ```
    /// use cosi::*;
    /// # use rand::rngs::OsRng;
    ///
    /// let keys: Vec<[u8; 32]> = (0..4).map(|_| Keypair::generate(&mut OsRng).public.to_bytes()).collect();
    /// let cosigners = Cosigners::from_bytes(&keys, Some(&[0b0000_0010])).unwrap();
    ///
    /// assert_eq!(cosigners.count_total(), 4);
    /// assert_eq!(cosigners.count_enabled(), 3);
    /// ```
    pub fn from_bytes<B>(public_keys: &[B], mask: Option<&[u8]>) -> Result<Cosigners, CosiError>
    where
        B: AsRef<[u8]>,
    {
        let keys = public_keys
            .iter()
            .map(|bytes| PublicKey::from_bytes(bytes.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cosigners::new(keys, mask))
    }

    /// The roster, in signing order.
    pub fn public_keys(&self) -> &[PublicKey] {
        &self.keys
    }

    /// Total number of cosigners.
    pub fn count_total(&self) -> usize {
        self.keys.len()
    }

    /// Number of cosigners currently enabled in the mask.
    pub fn count_enabled(&self) -> usize {
        // padding bits are never set, so every set bit is a disabled cosigner
        let disabled: u32 = self.mask.iter().map(|b| b.count_ones()).sum();
        self.keys.len() - disabled as usize
    }

    /// Length in bytes of a complete mask for this roster.
    pub fn mask_len(&self) -> usize {
        self.mask.len()
    }

    /// A copy of the current participation mask.
    pub fn mask(&self) -> Vec<u8> {
        self.mask.clone()
    }

    /// Replace the participation mask.
    ///
    /// Bits of missing bytes in a short `mask` count as `Enabled`; bits
    /// past the end of the roster are ignored. Only cosigners whose bit
    /// actually changes touch the cached aggregate.
    pub fn set_mask(&mut self, mask: &[u8]) {
        for index in 0..self.keys.len() {
            self.flip(index, MaskBit::of(mask, index));
        }
        #[cfg(debug_assertions)]
        assert!(self.aggregate == self.recompute_aggregate());
    }

    /// Enable or disable a single cosigner.
    ///
    /// # Panics
    ///
    /// If `index` is not a position in the roster.
    pub fn set_mask_bit(&mut self, index: usize, value: MaskBit) {
        self.check_index(index);
        self.flip(index, value);
        #[cfg(debug_assertions)]
        assert!(self.aggregate == self.recompute_aggregate());
    }

    /// Whether cosigner `index` is enabled.
    ///
    /// # Panics
    ///
    /// If `index` is not a position in the roster.
    pub fn mask_bit(&self, index: usize) -> MaskBit {
        self.check_index(index);
        MaskBit::of(&self.mask, index)
    }

    /// The sum of the public keys of every enabled cosigner.
    pub fn aggregate_public_key(&self) -> PublicKey {
        PublicKey::from_point(self.aggregate)
    }

    /// Replace the acceptance policy used by verification.
    pub fn set_policy<P>(&mut self, policy: P)
    where
        P: Policy + Send + Sync + 'static,
    {
        self.policy = Box::new(policy);
    }

    /// The acceptance policy used by verification.
    pub fn policy(&self) -> &(dyn Policy + Send + Sync) {
        self.policy.as_ref()
    }

    /// Sum the enabled cosigners' keys from scratch, ignoring the cache.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn recompute_aggregate(&self) -> EdwardsPoint {
        self.keys
            .iter()
            .enumerate()
            .filter(|(i, _)| MaskBit::of(&self.mask, *i) == MaskBit::Enabled)
            .fold(EdwardsPoint::identity(), |sum, (_, key)| sum + key.as_point())
    }

    pub(crate) fn key(&self, index: usize) -> &PublicKey {
        self.check_index(index);
        &self.keys[index]
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.keys.len(),
            "cosigner index {} out of range for {} cosigners",
            index,
            self.keys.len()
        );
    }

    /// Move cosigner `index` to `value`, keeping the aggregate in step.
    fn flip(&mut self, index: usize, value: MaskBit) {
        let (byte, bit) = mask::position(index);
        let disabled = self.mask[byte] & bit != 0;

        match value {
            MaskBit::Disabled if !disabled => {
                self.mask[byte] |= bit;
                self.aggregate -= self.keys[index].as_point();
                trace!(index, "cosigner disabled");
            }
            MaskBit::Enabled if disabled => {
                self.mask[byte] &= !bit;
                self.aggregate += self.keys[index].as_point();
                trace!(index, "cosigner enabled");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mask::mask_from_enabled;
    use crate::Keypair;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    fn keys(n: usize, seed: u8) -> Vec<PublicKey> {
        let mut csprng = ChaChaRng::from_seed([seed; 32]);
        (0..n).map(|_| Keypair::generate(&mut csprng).public).collect()
    }

    fn sum(keys: &[PublicKey], indices: &[usize]) -> EdwardsPoint {
        indices
            .iter()
            .fold(EdwardsPoint::identity(), |acc, i| acc + keys[*i].as_point())
    }

    #[test]
    fn five_cosigners_two_disabled() {
        let keys = keys(5, 1);
        let cosigners = Cosigners::new(keys.clone(), Some(&[0b0000_1010]));

        assert_eq!(cosigners.count_total(), 5);
        assert_eq!(cosigners.count_enabled(), 3);
        assert_eq!(cosigners.mask(), vec![0b0000_1010]);
        assert_eq!(cosigners.aggregate_public_key().into_point(), sum(&keys, &[0, 2, 4]));
    }

    #[test]
    fn new_without_mask_enables_everyone() {
        let keys = keys(9, 2);
        let cosigners = Cosigners::new(keys.clone(), None);

        assert_eq!(cosigners.mask_len(), 2);
        assert_eq!(cosigners.mask(), vec![0, 0]);
        assert_eq!(cosigners.count_enabled(), 9);
        assert_eq!(
            cosigners.aggregate_public_key().into_point(),
            sum(&keys, &(0..9).collect::<Vec<_>>())
        );
    }

    #[test]
    fn empty_roster() {
        let cosigners = Cosigners::new(Vec::new(), None);
        assert_eq!(cosigners.count_total(), 0);
        assert_eq!(cosigners.mask_len(), 0);
        assert_eq!(cosigners.aggregate_public_key().into_point(), EdwardsPoint::identity());
    }

    #[test]
    fn from_bytes_rejects_bad_key() {
        let mut encoded: Vec<[u8; 32]> = keys(4, 3).iter().map(|k| k.to_bytes()).collect();
        let mut bad = [0u8; 32];
        bad[0] = 2;
        encoded[2] = bad;

        assert_eq!(
            Cosigners::from_bytes(&encoded, None).unwrap_err(),
            CosiError::PointDecompressionError
        );
    }

    #[test]
    fn from_bytes_rejects_short_key() {
        let encoded: Vec<Vec<u8>> = vec![keys(1, 4)[0].to_bytes().to_vec(), vec![1u8; 31]];
        match Cosigners::from_bytes(&encoded, None) {
            Err(CosiError::BytesLengthError { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn short_mask_enables_the_rest() {
        let keys = keys(12, 5);
        let mut cosigners = Cosigners::new(keys, Some(&[0xff, 0x0f]));
        assert_eq!(cosigners.count_enabled(), 0);

        cosigners.set_mask(&[0xff]);
        assert_eq!(cosigners.count_enabled(), 4);
        assert_eq!(cosigners.mask(), vec![0xff, 0x00]);

        cosigners.set_mask(&[]);
        assert_eq!(cosigners.count_enabled(), 12);
    }

    #[test]
    fn padding_bits_are_ignored() {
        let mut cosigners = Cosigners::new(keys(3, 6), None);
        cosigners.set_mask(&[0b1111_1001, 0xff]);

        assert_eq!(cosigners.mask(), vec![0b0000_0001]);
        assert_eq!(cosigners.count_enabled(), 2);
    }

    #[test]
    fn incremental_matches_fresh() {
        let keys = keys(20, 7);
        let mut csprng = ChaChaRng::from_seed([8u8; 32]);

        for _ in 0..16 {
            let m1: Vec<u8> = (0..3).map(|_| csprng.gen()).collect();
            let m2: Vec<u8> = (0..3).map(|_| csprng.gen()).collect();

            let mut incremental = Cosigners::new(keys.clone(), None);
            incremental.set_mask(&m1);
            incremental.set_mask(&m2);

            let fresh = Cosigners::new(keys.clone(), Some(&m2));

            assert_eq!(incremental.mask(), fresh.mask());
            assert_eq!(incremental.aggregate_public_key(), fresh.aggregate_public_key());
            assert_eq!(incremental.aggregate, incremental.recompute_aggregate());
        }
    }

    #[test]
    fn mask_reflects_set_mask_bit() {
        let n = 13;
        let mut cosigners = Cosigners::new(keys(n, 9), None);
        let mut csprng = ChaChaRng::from_seed([10u8; 32]);
        let mut expected = vec![true; n];

        for _ in 0..64 {
            let index = csprng.gen_range(0..n);
            let enable: bool = csprng.gen();
            let value = if enable { MaskBit::Enabled } else { MaskBit::Disabled };
            cosigners.set_mask_bit(index, value);
            expected[index] = enable;

            let enabled: Vec<usize> = (0..n).filter(|i| expected[*i]).collect();
            assert_eq!(cosigners.mask(), mask_from_enabled(n, &enabled));
            assert_eq!(cosigners.mask_bit(index), value);
            assert_eq!(cosigners.count_enabled(), enabled.len());
        }
    }

    #[test]
    fn mask_is_a_copy() {
        let mut cosigners = Cosigners::new(keys(4, 12), None);
        let mut mask = cosigners.mask();
        mask[0] = 0xff;

        assert_eq!(cosigners.count_enabled(), 4);
        cosigners.set_mask_bit(1, MaskBit::Disabled);
        assert_eq!(mask, vec![0xff]);
    }

    #[test]
    #[should_panic]
    fn set_mask_bit_out_of_range() {
        let mut cosigners = Cosigners::new(keys(4, 13), None);
        cosigners.set_mask_bit(4, MaskBit::Disabled);
    }
}
