use nom::IResult;

use crate::types::NamedGroup;

/// First message, initiator to responder. Requests a key exchange group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Initiate {
    pub group: NamedGroup,
}

impl Initiate {
    pub fn new(group: NamedGroup) -> Self {
        Initiate { group }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], Initiate> {
        let (input, group) = NamedGroup::parse(input)?;
        Ok((input, Initiate { group }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        self.group.serialize(output);
    }
}
