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

//
// Collective signatures over ed25519
//

// Modified From the hard work off:
// Authors:
// - Bryan Ford <bryan.ford@epfl.ch>
// - Isis Agora Lovecruft <isis@patternsinthevoid.net>
// - Jeff Burdges <jeff@web3.foundation>

//Modeled from
//https://github.com/dalek-cryptography/ed25519-dalek/blob/master/src/ed25519.rs

//Useful links:
//https://arxiv.org/abs/1503.08768
//https://github.com/dedis/cothority/tree/master/cosi
//https://tools.ietf.org/html/rfc8032

//! A roster of ed25519 key holders jointly signs a message; the result is
//! one signature `R || S || mask` that anyone holding the roster can check,
//! learning exactly which cosigners took part.
//!
//! * [`Cosigners`] holds the roster, the participation mask and the
//!   acceptance [`Policy`].
//! * [`cosign`] runs the commit, challenge and response rounds.
//! * [`Cosigners::verify`] checks a finished signature.

#[macro_use]
mod ser;

mod errors;
pub use errors::CosiError;
pub mod tools;
pub mod keys;
pub mod signature;
pub mod mask;
pub mod policy;
pub mod cosigners;
pub mod cosign;
mod verify;

// Export everything public in cosi.
pub use crate::signature::{Signature, SIGNATURE_LENGTH};
pub use crate::keys::*;
pub use crate::mask::{mask_len, MaskBit};
pub use crate::policy::{FullPolicy, Policy, ThresholdPolicy};
pub use crate::cosigners::Cosigners;
pub use crate::cosign::{AggregateCommitment, CollectiveSignature, Commitment, SignaturePart};
