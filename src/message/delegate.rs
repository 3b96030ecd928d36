use nom::IResult;

use super::{parse_vec16, serialize_vec16};

/// Final message: the initiator's blob, sealed under the delegation key.
#[derive(Debug, PartialEq, Eq)]
pub struct Delegate<'a> {
    pub sealed: &'a [u8],
}

impl<'a> Delegate<'a> {
    pub fn new(sealed: &'a [u8]) -> Self {
        Delegate { sealed }
    }

    pub fn parse(input: &'a [u8]) -> IResult<&'a [u8], Delegate<'a>> {
        let (input, sealed) = parse_vec16(input)?;
        Ok((input, Delegate { sealed }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        serialize_vec16(self.sealed, output);
    }
}
