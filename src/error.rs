use thiserror::Error;

use crate::message::MessageType;
use crate::types::NamedGroup;

/// Errors produced by the SRD engine.
///
/// Every error that reaches [`Context::input`](crate::Context::input) moves the
/// context to the failed state. The same value is then repeated for every
/// later call, which is why the type is `Clone + PartialEq`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Message is shorter than its header or declared length")]
    ParseIncomplete,

    #[error("Message could not be parsed: {0:?}")]
    ParseError(nom::error::ErrorKind),

    #[error("Message has {0} trailing bytes")]
    TrailingBytes(usize),

    #[error("Bad message signature {0:#010x}")]
    BadSignature(u32),

    #[error("Unknown message type {0}")]
    UnknownMessageType(u8),

    #[error("Expected {0:?} but got {1:?}")]
    UnexpectedMessage(MessageType, MessageType),

    #[error("Expected sequence number {0} but got {1}")]
    BadSequence(u8, u8),

    #[error("Unsupported flags {0:#06x}")]
    BadFlags(u16),

    #[error("Message length {0} exceeds the limit of {1}")]
    TooBigLength(usize, usize),

    #[error("Expected an empty input to start the handshake")]
    UnexpectedInput,

    #[error("Key exchange group {0:?} is not accepted")]
    UnsupportedGroup(NamedGroup),

    #[error("Peer changed key exchange group from {0:?} to {1:?}")]
    GroupMismatch(NamedGroup, NamedGroup),

    #[error("Invalid peer public key")]
    InvalidPublicKey,

    #[error("Transcript tag verification failed")]
    BadTag,

    #[error("Channel binding presence differs between peers")]
    ChannelBindingMismatch,

    #[error("Channel binding token does not match")]
    InvalidChannelBinding,

    #[error("No blob set before it had to be delegated")]
    MissingBlob,

    #[error("Blob name must be 1..=255 bytes of UTF-8")]
    InvalidBlobName,

    #[error("Blob data of {0} bytes is too long")]
    BlobTooLong(usize),

    #[error("Blob scheme {0:?} is not accepted")]
    BlobRejected(String),

    #[error("Blob is malformed")]
    MalformedBlob,

    #[error("Blob already delegated")]
    BlobAlreadySent,

    #[error("Channel binding data can only be set before the first round")]
    CertDataLocked,

    #[error("Only the initiator asserts a blob")]
    NotInitiator,

    #[error("Handshake already finished")]
    Finished,

    #[error("Operation not valid in the current state")]
    WrongState,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Crypto error: {0}")]
    CryptoError(String),
}

impl<'a> From<nom::Err<nom::error::Error<&'a [u8]>>> for Error {
    fn from(value: nom::Err<nom::error::Error<&'a [u8]>>) -> Self {
        match value {
            nom::Err::Incomplete(_) => Error::ParseIncomplete,
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                if e.code == nom::error::ErrorKind::Eof {
                    Error::ParseIncomplete
                } else {
                    Error::ParseError(e.code)
                }
            }
        }
    }
}
