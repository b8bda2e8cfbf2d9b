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

//! Participation masks.
//!
//! A mask is a byte-packed, little-endian bit vector with one bit per
//! cosigner: bits 0-7 of byte 0 are cosigners 0-7, bits 0-7 of byte 1
//! are cosigners 8-15, and so on. A set bit marks the cosigner as
//! *disabled*, a clear bit as *enabled*, so the all zero mask means
//! everyone took part.

/// One bit of a participation mask.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MaskBit {
    /// The cosigner takes part (bit clear).
    Enabled,
    /// The cosigner is absent (bit set).
    Disabled,
}

impl MaskBit {
    /// Read the bit of cosigner `index` out of `mask`. Bytes missing
    /// from a short mask read as `Enabled`.
    pub fn of(mask: &[u8], index: usize) -> MaskBit {
        let (byte, bit) = position(index);
        match mask.get(byte) {
            Some(b) if b & bit != 0 => MaskBit::Disabled,
            _ => MaskBit::Enabled,
        }
    }
}

/// Bytes needed for a mask over `n` cosigners.
pub fn mask_len(n: usize) -> usize {
    (n + 7) >> 3
}

/// Byte offset and bit within that byte for cosigner `index`.
#[inline]
pub(crate) fn position(index: usize) -> (usize, u8) {
    (index >> 3, 1u8 << (index & 7))
}

/// True when no bit at or past cosigner `n` is set.
pub(crate) fn padding_is_clear(mask: &[u8], n: usize) -> bool {
    if mask.len() > mask_len(n) && mask[mask_len(n)..].iter().any(|b| *b != 0) {
        return false;
    }
    match n & 7 {
        0 => true,
        used => match mask.get(n >> 3) {
            Some(last) => last >> used == 0,
            None => true,
        },
    }
}

/// Build a mask over `n` cosigners that enables exactly `enabled`.
///
/// # Panics
///
/// If an index in `enabled` is not below `n`.
pub fn mask_from_enabled(n: usize, enabled: &[usize]) -> Vec<u8> {
    let mut mask = vec![0u8; mask_len(n)];
    for index in 0..n {
        let (byte, bit) = position(index);
        mask[byte] |= bit;
    }
    for &index in enabled {
        assert!(index < n, "cosigner index {} out of range for {} cosigners", index, n);
        let (byte, bit) = position(index);
        mask[byte] &= !bit;
    }
    mask
}
