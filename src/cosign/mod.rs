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

//! Collective signing rounds.
//!
//! A leader drives each round over a [`Cosigners`](crate::Cosigners) roster:
//!
//! 1. *Announce*: the leader sends the message to the cosigners
//!    (transport is up to the caller).
//! 2. *Commit*: each willing cosigner draws a nonce with [`commit`] and
//!    sends back its [`Commitment`], keeping the [`Secret`].
//! 3. *Aggregate commit*: the leader calls
//!    [`Cosigners::aggregate_commit`](crate::Cosigners::aggregate_commit)
//!    with one slot per cosigner, which freezes the participation mask,
//!    and broadcasts the resulting [`AggregateCommitment`].
//! 4. *Challenge and sign*: each participant answers with [`cosign`],
//!    consuming its `Secret`, and sends back a [`SignaturePart`].
//! 5. *Aggregate signature*: the leader calls
//!    [`Cosigners::aggregate_signature`](crate::Cosigners::aggregate_signature)
//!    and obtains the [`CollectiveSignature`].
//!
//! [`Cosigner`] bundles stages 2 and 4 for one participant and refuses
//! to answer twice with the same nonce.
//!
//! # Example
//!
//! ```
//! use cosi::*;
//! use cosi::cosign::Cosigner;
//! use rand::rngs::OsRng;
//!
//! let message = b"the ledger at height 7";
//! let mut signers: Vec<Cosigner> = (0..3)
//!     .map(|i| Cosigner::new(Keypair::generate(&mut OsRng), i))
//!     .collect();
//! let mut cosigners = Cosigners::new(signers.iter().map(|s| *s.public_key()).collect(), None);
//!
//! let commits: Vec<_> = signers.iter_mut().map(|s| Some(s.commit(&mut OsRng, message))).collect();
//! let aggregate = cosigners.aggregate_commit(&commits).unwrap();
//!
//! let parts: Vec<_> = signers
//!     .iter_mut()
//!     .map(|s| s.cosign(message, &aggregate).ok())
//!     .collect();
//! let signature = cosigners.aggregate_signature(&aggregate, &parts).unwrap();
//!
//! assert!(cosigners.verify(message, &signature.to_bytes()));
//! ```

mod commitment;
mod cosigner;
mod leader;
mod signature;

pub use self::commitment::{commit, AggregateCommitment, Commitment, Secret, COMMITMENT_LENGTH};
pub use self::cosigner::{cosign, Cosigner};
pub use self::signature::{CollectiveSignature, SignaturePart, SIGNATURE_PART_LENGTH};
