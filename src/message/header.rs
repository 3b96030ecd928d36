use nom::number::complete::{be_u8, le_u16, le_u32};
use nom::IResult;

use crate::Error;

use super::SRD_SIGNATURE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub msg_type: MessageType,
    pub seq_num: u8,
    pub flags: u16,
    pub length: u16,
}

impl Header {
    /// Parse the header. Only the signature is checked here, the remaining
    /// fields are validated by the message parser.
    pub fn parse(input: &[u8]) -> Result<(&[u8], Header), Error> {
        let (input, signature) = le_u32::<_, nom::error::Error<&[u8]>>(input)?;
        if signature != SRD_SIGNATURE {
            return Err(Error::BadSignature(signature));
        }

        let (input, header) = Self::parse_fields(input)?;
        Ok((input, header))
    }

    fn parse_fields(input: &[u8]) -> IResult<&[u8], Header> {
        let (input, msg_type) = MessageType::parse(input)?;
        let (input, seq_num) = be_u8(input)?;
        let (input, flags) = le_u16(input)?;
        let (input, length) = le_u16(input)?;

        Ok((
            input,
            Header {
                msg_type,
                seq_num,
                flags,
                length,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(&SRD_SIGNATURE.to_le_bytes());
        output.push(self.msg_type.as_u8());
        output.push(self.seq_num);
        output.extend_from_slice(&self.flags.to_le_bytes());
        output.extend_from_slice(&self.length.to_le_bytes());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Initiate,
    Offer,
    Accept,
    Confirm,
    Delegate,
    Unknown(u8),
}

impl MessageType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => MessageType::Initiate,
            2 => MessageType::Offer,
            3 => MessageType::Accept,
            4 => MessageType::Confirm,
            5 => MessageType::Delegate,
            _ => MessageType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            MessageType::Initiate => 1,
            MessageType::Offer => 2,
            MessageType::Accept => 3,
            MessageType::Confirm => 4,
            MessageType::Delegate => 5,
            MessageType::Unknown(value) => *value,
        }
    }

    /// Position of this message in the handshake.
    pub fn seq_num(&self) -> u8 {
        self.as_u8().wrapping_sub(1)
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], MessageType> {
        let (input, value) = be_u8(input)?;
        Ok((input, MessageType::from_u8(value)))
    }
}
