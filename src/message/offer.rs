use nom::IResult;

use crate::types::NamedGroup;

use super::{parse_array, parse_vec16, serialize_vec16, NONCE_LEN};

/// Responder's answer to Initiate: its ephemeral public key and nonce.
#[derive(Debug, PartialEq, Eq)]
pub struct Offer<'a> {
    pub group: NamedGroup,
    pub public_key: &'a [u8],
    pub nonce: [u8; NONCE_LEN],
}

impl<'a> Offer<'a> {
    pub fn new(group: NamedGroup, public_key: &'a [u8], nonce: [u8; NONCE_LEN]) -> Self {
        Offer {
            group,
            public_key,
            nonce,
        }
    }

    pub fn parse(input: &'a [u8]) -> IResult<&'a [u8], Offer<'a>> {
        let (input, group) = NamedGroup::parse(input)?;
        let (input, public_key) = parse_vec16(input)?;
        let (input, nonce) = parse_array::<NONCE_LEN>(input)?;

        Ok((
            input,
            Offer {
                group,
                public_key,
                nonce,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        self.group.serialize(output);
        serialize_vec16(self.public_key, output);
        output.extend_from_slice(&self.nonce);
    }
}
