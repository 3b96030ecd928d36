//! SRD wire messages.
//!
//! Every message is a 10 byte little-endian header followed by `length` bytes
//! of body. The body always ends in a 32 byte transcript tag, which covers
//! the header and everything before the tag. A message is exactly
//! `HEADER_LEN + length` bytes long, so no outer framing is needed.

mod accept;
mod confirm;
mod delegate;
mod header;
mod initiate;
mod offer;

pub use accept::Accept;
pub use confirm::Confirm;
pub use delegate::Delegate;
pub use header::{Header, MessageType};
pub use initiate::Initiate;
pub use offer::Offer;

use nom::bytes::complete::take;
use nom::number::complete::le_u16;
use nom::IResult;

use crate::Error;

/// "SRD\0" read as a little-endian u32.
pub const SRD_SIGNATURE: u32 = 0x0044_5253;

pub const HEADER_LEN: usize = 10;
pub const TAG_LEN: usize = 32;
pub const NONCE_LEN: usize = 32;
pub const CBT_LEN: usize = 32;

/// Channel binding token present.
pub const FLAG_CBT: u16 = 0x0001;

const KNOWN_FLAGS: u16 = FLAG_CBT;

/// Typed body of one message.
#[derive(Debug, PartialEq, Eq)]
pub enum Body<'a> {
    Initiate(Initiate),
    Offer(Offer<'a>),
    Accept(Accept<'a>),
    Confirm(Confirm),
    Delegate(Delegate<'a>),
}

impl<'a> Body<'a> {
    pub fn message_type(&self) -> MessageType {
        match self {
            Body::Initiate(_) => MessageType::Initiate,
            Body::Offer(_) => MessageType::Offer,
            Body::Accept(_) => MessageType::Accept,
            Body::Confirm(_) => MessageType::Confirm,
            Body::Delegate(_) => MessageType::Delegate,
        }
    }

    pub fn flags(&self) -> u16 {
        match self {
            Body::Accept(a) if a.cbt.is_some() => FLAG_CBT,
            Body::Confirm(c) if c.cbt.is_some() => FLAG_CBT,
            _ => 0,
        }
    }

    /// Parse a body (without the trailing tag). All bytes must be consumed.
    pub fn parse(input: &'a [u8], msg_type: MessageType, flags: u16) -> Result<Body<'a>, Error> {
        let has_cbt = flags & FLAG_CBT != 0;

        if has_cbt && !msg_type.may_carry_cbt() {
            return Err(Error::BadFlags(flags));
        }

        let (rest, body) = match msg_type {
            MessageType::Initiate => {
                let (rest, m) = Initiate::parse(input)?;
                (rest, Body::Initiate(m))
            }
            MessageType::Offer => {
                let (rest, m) = Offer::parse(input)?;
                (rest, Body::Offer(m))
            }
            MessageType::Accept => {
                let (rest, m) = Accept::parse(input, has_cbt)?;
                (rest, Body::Accept(m))
            }
            MessageType::Confirm => {
                let (rest, m) = Confirm::parse(input, has_cbt)?;
                (rest, Body::Confirm(m))
            }
            MessageType::Delegate => {
                let (rest, m) = Delegate::parse(input)?;
                (rest, Body::Delegate(m))
            }
            MessageType::Unknown(v) => return Err(Error::UnknownMessageType(v)),
        };

        if !rest.is_empty() {
            return Err(Error::TrailingBytes(rest.len()));
        }

        Ok(body)
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        match self {
            Body::Initiate(m) => m.serialize(output),
            Body::Offer(m) => m.serialize(output),
            Body::Accept(m) => m.serialize(output),
            Body::Confirm(m) => m.serialize(output),
            Body::Delegate(m) => m.serialize(output),
        }
    }
}

/// One parsed message, borrowing from the input buffer.
#[derive(Debug)]
pub struct Message<'a> {
    pub header: Header,
    pub body: Body<'a>,
    /// Header and body, i.e. everything covered by `tag`.
    pub signed: &'a [u8],
    pub tag: &'a [u8],
}

impl<'a> Message<'a> {
    /// Parse exactly one message.
    ///
    /// `max_len` bounds the declared body length. Missing bytes are
    /// `Error::ParseIncomplete`, extra bytes `Error::TrailingBytes`.
    pub fn parse(input: &'a [u8], max_len: usize) -> Result<Message<'a>, Error> {
        let (rest, header) = Header::parse(input)?;
        header.validate()?;

        let length = header.length as usize;
        if length > max_len {
            return Err(Error::TooBigLength(length, max_len));
        }
        if rest.len() < length || length < TAG_LEN {
            return Err(Error::ParseIncomplete);
        }
        if rest.len() > length {
            return Err(Error::TrailingBytes(rest.len() - length));
        }

        let (body_bytes, tag) = rest.split_at(length - TAG_LEN);
        let body = Body::parse(body_bytes, header.msg_type, header.flags)?;

        trace!(
            "Parsed {:?} seq {} ({} bytes)",
            header.msg_type,
            header.seq_num,
            input.len()
        );

        Ok(Message {
            header,
            body,
            signed: &input[..input.len() - TAG_LEN],
            tag,
        })
    }

    /// Serialize header and body, leaving the trailing tag to the caller.
    ///
    /// The header length already accounts for the `TAG_LEN` bytes the caller
    /// must append.
    pub fn serialize_unsigned(body: &Body, max_len: usize) -> Result<Vec<u8>, Error> {
        let mut body_bytes = Vec::new();
        body.serialize(&mut body_bytes);

        let length = body_bytes.len() + TAG_LEN;
        if length > max_len {
            return Err(Error::TooBigLength(length, max_len));
        }

        let msg_type = body.message_type();
        let header = Header {
            msg_type,
            seq_num: msg_type.seq_num(),
            flags: body.flags(),
            length: length as u16,
        };

        let mut output = Vec::with_capacity(HEADER_LEN + length);
        header.serialize(&mut output);
        output.extend_from_slice(&body_bytes);
        Ok(output)
    }
}

impl MessageType {
    fn may_carry_cbt(&self) -> bool {
        matches!(self, MessageType::Accept | MessageType::Confirm)
    }
}

impl Header {
    fn validate(&self) -> Result<(), Error> {
        if let MessageType::Unknown(v) = self.msg_type {
            return Err(Error::UnknownMessageType(v));
        }

        let expected_seq = self.msg_type.seq_num();
        if self.seq_num != expected_seq {
            return Err(Error::BadSequence(expected_seq, self.seq_num));
        }

        if self.flags & !KNOWN_FLAGS != 0 {
            return Err(Error::BadFlags(self.flags));
        }

        Ok(())
    }
}

/// u16 length prefixed byte string.
pub(crate) fn parse_vec16(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (input, len) = le_u16(input)?;
    take(len as usize)(input)
}

pub(crate) fn serialize_vec16(data: &[u8], output: &mut Vec<u8>) {
    output.extend_from_slice(&(data.len() as u16).to_le_bytes());
    output.extend_from_slice(data);
}

pub(crate) fn parse_array<const N: usize>(input: &[u8]) -> IResult<&[u8], [u8; N]> {
    let (input, data) = take(N)(input)?;
    let mut array = [0u8; N];
    array.copy_from_slice(data);
    Ok((input, array))
}
