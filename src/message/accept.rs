use nom::IResult;

use crate::types::NamedGroup;

use super::{parse_array, parse_vec16, serialize_vec16, CBT_LEN, NONCE_LEN};

/// Initiator's key share, nonce and optional channel binding token.
///
/// First message authenticated with the integrity key.
#[derive(Debug, PartialEq, Eq)]
pub struct Accept<'a> {
    pub group: NamedGroup,
    pub public_key: &'a [u8],
    pub nonce: [u8; NONCE_LEN],
    pub cbt: Option<[u8; CBT_LEN]>,
}

impl<'a> Accept<'a> {
    pub fn new(
        group: NamedGroup,
        public_key: &'a [u8],
        nonce: [u8; NONCE_LEN],
        cbt: Option<[u8; CBT_LEN]>,
    ) -> Self {
        Accept {
            group,
            public_key,
            nonce,
            cbt,
        }
    }

    /// `has_cbt` comes from the header flags.
    pub fn parse(input: &'a [u8], has_cbt: bool) -> IResult<&'a [u8], Accept<'a>> {
        let (input, group) = NamedGroup::parse(input)?;
        let (input, public_key) = parse_vec16(input)?;
        let (input, nonce) = parse_array::<NONCE_LEN>(input)?;

        let (input, cbt) = if has_cbt {
            let (input, cbt) = parse_array::<CBT_LEN>(input)?;
            (input, Some(cbt))
        } else {
            (input, None)
        };

        Ok((
            input,
            Accept {
                group,
                public_key,
                nonce,
                cbt,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        self.group.serialize(output);
        serialize_vec16(self.public_key, output);
        output.extend_from_slice(&self.nonce);
        if let Some(cbt) = &self.cbt {
            output.extend_from_slice(cbt);
        }
    }
}
