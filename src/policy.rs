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

//! Acceptance policies.
//!
//! A collective signature that is cryptographically valid still has to
//! be signed by a set of cosigners the verifier finds acceptable. That
//! decision belongs to the caller; this module only gives it a shape.
//!
//! Any closure `Fn(usize, usize, &Cosigners) -> bool` is a policy too:
//!
//! ```
//! use cosi::*;
//! # use rand::rngs::OsRng;
//! # let keys: Vec<PublicKey> = (0..3).map(|_| Keypair::generate(&mut OsRng).public).collect();
//! let mut cosigners = Cosigners::new(keys, None);
//!
//! // the first cosigner is mandatory, plus any one other
//! cosigners.set_policy(|enabled: usize, _total: usize, group: &Cosigners| {
//!     group.mask_bit(0) == MaskBit::Enabled && enabled >= 2
//! });
//! ```

use crate::cosigners::Cosigners;
use tracing::warn;

/// Decides whether the set of cosigners behind a signature is acceptable.
///
/// Policies are consulted after the participation mask of the signature
/// has been applied to `cosigners`, and must not depend on anything but
/// participation.
pub trait Policy {
    /// `enabled` cosigners out of `total` took part; accept or reject.
    fn check(&self, enabled: usize, total: usize, cosigners: &Cosigners) -> bool;
}

/// Every cosigner must have signed. The default.
#[derive(Copy, Clone, Debug, Default)]
pub struct FullPolicy;

impl Policy for FullPolicy {
    fn check(&self, enabled: usize, total: usize, _cosigners: &Cosigners) -> bool {
        enabled == total
    }
}

/// At least `threshold` cosigners must have signed.
#[derive(Copy, Clone, Debug)]
pub struct ThresholdPolicy {
    threshold: usize,
}

impl ThresholdPolicy {
    /// Accept signatures from `threshold` or more cosigners.
    ///
    /// A threshold of zero accepts a signature nobody signed, which is
    /// almost certainly not what the caller wants.
    pub fn new(threshold: usize) -> ThresholdPolicy {
        if threshold == 0 {
            warn!("threshold policy of 0 accepts collective signatures with no cosigners");
        }
        ThresholdPolicy { threshold }
    }

    /// The minimum number of cosigners.
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Policy for ThresholdPolicy {
    fn check(&self, enabled: usize, _total: usize, _cosigners: &Cosigners) -> bool {
        enabled >= self.threshold
    }
}

impl<F> Policy for F
where
    F: Fn(usize, usize, &Cosigners) -> bool,
{
    fn check(&self, enabled: usize, total: usize, cosigners: &Cosigners) -> bool {
        self(enabled, total, cosigners)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Keypair, MaskBit, PublicKey};
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn roster(n: usize) -> Cosigners {
        let mut csprng = ChaChaRng::from_seed([11u8; 32]);
        let keys: Vec<PublicKey> = (0..n).map(|_| Keypair::generate(&mut csprng).public).collect();
        Cosigners::new(keys, None)
    }

    #[test]
    fn full_policy() {
        let cosigners = roster(4);
        assert!(FullPolicy.check(4, 4, &cosigners));
        assert!(!FullPolicy.check(3, 4, &cosigners));
    }

    #[test]
    fn threshold_policy_boundaries() {
        let n = 8;
        let cosigners = roster(n);
        for &k in &[0, 1, n / 2, n] {
            let policy = ThresholdPolicy::new(k);
            assert!(policy.check(k, n, &cosigners), "threshold {} rejected {}", k, k);
            if k > 0 {
                assert!(!policy.check(k - 1, n, &cosigners), "threshold {} accepted {}", k, k - 1);
            }
        }
    }

    #[test]
    fn closure_policy_sees_the_roster() {
        let mut cosigners = roster(3);
        let first_required = |_: usize, _: usize, group: &Cosigners| group.mask_bit(0) == MaskBit::Enabled;

        assert!(first_required.check(3, 3, &cosigners));
        cosigners.set_mask_bit(0, MaskBit::Disabled);
        assert!(!first_required.check(2, 3, &cosigners));
    }
}
