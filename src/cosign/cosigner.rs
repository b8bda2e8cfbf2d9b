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

//! The cosigner's side of a signing round

use super::commitment::{commit, AggregateCommitment, Commitment, Secret};
use super::signature::SignaturePart;
use crate::keys::{Keypair, PublicKey};
use crate::mask::MaskBit;
use crate::tools;
use crate::CosiError;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use std::mem;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Stage 4: answer the leader's aggregate commitment with a signature part.
///
/// Computes `s_i = r_i + c·a_i` with `c = H(R || A || M)`. The `secret`
/// is consumed, so a nonce cannot be used for a second challenge.
pub fn cosign(
    keypair: &Keypair,
    secret: Secret,
    message: &[u8],
    aggregate: &AggregateCommitment,
) -> SignaturePart {
    let expanded = keypair.secret.expand();
    let c = aggregate.challenge(message);

    SignaturePart(secret.nonce + c * expanded.scalar())
}

/// Where a cosigner is within one signing round.
enum Round {
    /// Nothing committed yet
    Idle,
    /// Committed to a nonce for the message with this digest
    Committed {
        digest: [u8; 64],
        secret: Secret,
        commitment: Commitment,
    },
    /// The nonce answered a challenge and is gone
    Signed,
}

/// A single cosigner, tracking its own signing round.
///
/// Wraps [`commit`] and [`cosign`] so that misuse is reported at runtime
/// rather than only prevented by ownership: answering without a commitment,
/// answering twice, answering for a different message, or answering a
/// broadcast that does not include this cosigner.
pub struct Cosigner {
    keypair: Keypair,
    /// position in the roster
    index: usize,
    round: Round,
}

impl Cosigner {
    /// Create a cosigner holding `keypair` at position `index` of the roster.
    pub fn new(keypair: Keypair, index: usize) -> Cosigner {
        Cosigner {
            keypair,
            index,
            round: Round::Idle,
        }
    }

    /// Position in the roster.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keypair.public
    }

    /// The commitment of the open round, if there is one.
    pub fn commitment(&self) -> Option<Commitment> {
        match &self.round {
            Round::Committed { commitment, .. } => Some(*commitment),
            _ => None,
        }
    }

    /// Commit to a fresh nonce for `message`.
    ///
    /// Starts a new round; a nonce still held from an unfinished round is
    /// dropped, and erased with it.
    pub fn commit<R>(&mut self, csprng: &mut R, message: &[u8]) -> Commitment
    where
        R: CryptoRng + RngCore,
    {
        let (commitment, secret) = commit(csprng);
        self.round = Round::Committed {
            digest: digest(message),
            secret,
            commitment,
        };
        commitment
    }

    /// Answer the leader's aggregate commitment.
    ///
    /// # Errors
    ///
    /// * `MissingCommitment` if [`Cosigner::commit`] was never called;
    /// * `CommitmentReused` if this round's nonce already answered;
    /// * `MessageMismatch` if `message` is not the one committed to;
    /// * `MaskMismatch` if the broadcast mask leaves this cosigner out.
    ///
    /// The last two leave the round open.
    pub fn cosign(
        &mut self,
        message: &[u8],
        aggregate: &AggregateCommitment,
    ) -> Result<SignaturePart, CosiError> {
        match &self.round {
            Round::Idle => return Err(CosiError::MissingCommitment),
            Round::Signed => return Err(CosiError::CommitmentReused),
            Round::Committed { digest: committed, .. } => {
                if !bool::from(committed[..].ct_eq(&digest(message)[..])) {
                    debug!(index = self.index, "refusing to sign a different message");
                    return Err(CosiError::MessageMismatch);
                }
            }
        }

        if MaskBit::of(aggregate.mask(), self.index) == MaskBit::Disabled {
            debug!(index = self.index, "aggregate commitment excludes this cosigner");
            return Err(CosiError::MaskMismatch);
        }

        match mem::replace(&mut self.round, Round::Signed) {
            Round::Committed { secret, .. } => Ok(cosign(&self.keypair, secret, message, aggregate)),
            _ => Err(CosiError::MissingCommitment),
        }
    }
}

fn digest(message: &[u8]) -> [u8; 64] {
    let mut h = Sha512::new();
    h.update(message);
    tools::sha512(h)
}
