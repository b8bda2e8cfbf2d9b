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

//! Keys to the kingdom
//!
//! Collective signing uses plain ed25519 keys: any ed25519 keypair can
//! join a cosigner roster unchanged.

mod public;
pub use public::{PublicKey, PUBLIC_KEY_LENGTH};

mod secret;
pub use secret::{ExpandedSecretKey, SecretKey, SECRET_KEY_LENGTH};

mod pair;
pub use pair::{Keypair, KEYPAIR_LENGTH};

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::{edwards::EdwardsPoint, traits::IsIdentity};

    #[test]
    fn test_public_keys_are_not_identity() {
        let sk = SecretKey([0u8; SECRET_KEY_LENGTH]);
        let pk = PublicKey::from_secret(&sk);

        // clamping sets bit 254, so even the all zero seed is a real key
        assert!(!pk.into_point().is_identity());
        assert_eq!(pk.into_point(), EdwardsPoint::mul_base(sk.expand().scalar()));
    }
}
