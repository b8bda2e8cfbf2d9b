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

//! Errors which may occur when parsing keys and/or signatures to or from wire formats,
//! or when driving a collective signing round.

use thiserror::Error;

/// Represents an error in decoding, collective signing, or verification.
#[derive(Eq, PartialEq, Debug, Error, Clone)]
pub enum CosiError {
    /// Invalid point provided.
    #[error("Cannot decompress Edwards point")]
    PointDecompressionError,

    /// Invalid scalar provided.
    #[error("Cannot use scalar with high-bit set")]
    ScalarFormatError,

    /// An object received the wrong number of bytes.
    #[error("{name} must be {length} bytes in length")]
    BytesLengthError {
        /// Name of the object that failed to parse.
        name: &'static str,
        /// Description of what the bytes should look like.
        description: &'static str,
        /// Expected length.
        length: usize,
    },

    /// The public half of a keypair does not belong to its secret half.
    #[error("Public key does not match the secret key")]
    MismatchedKeypair,

    /// The verification equation wasn't satisfied
    #[error("Verification equation was not satisfied")]
    VerifyError,

    /// A signature part failed the individual response check.
    #[error("Signature part of cosigner {signer} failed to verify")]
    InvalidPart {
        /// Roster index of the faulty cosigner.
        signer: usize,
    },

    /// A commitment that was already used to sign was offered again.
    #[error("Commitment was already consumed by a signature")]
    CommitmentReused,

    /// Signing was requested without a prior commitment.
    #[error("No commitment is pending for this cosigner")]
    MissingCommitment,

    /// The pending commitment is bound to another message.
    #[error("Commitment was made for a different message")]
    MessageMismatch,

    /// The participation mask changed between commit and sign.
    #[error("Participation mask changed during the round, restart with an adjusted mask")]
    MaskMismatch,
}

/// Convert `CosiError` into `::serde::de::Error` aka `SerdeError`
///
/// We should do this with `From` but right now the orphan rules prohibit
/// `impl From<CosiError> for E where E: ::serde::de::Error`.
pub(crate) fn serde_error_from_cosi_error<E>(err: CosiError) -> E
where
    E: ::serde::de::Error,
{
    match err {
        CosiError::PointDecompressionError => E::custom("Edwards point decompression failed"),
        CosiError::ScalarFormatError => E::custom("improper scalar has high-bit set"),
        CosiError::BytesLengthError { description, .. } => E::custom(description),
        CosiError::MismatchedKeypair => E::custom("public key does not match the secret key"),
        other => E::custom(other),
    }
}
