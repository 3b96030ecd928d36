use nom::IResult;

use super::{parse_array, CBT_LEN};

/// Responder's proof of the shared keys, with its channel binding token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirm {
    pub cbt: Option<[u8; CBT_LEN]>,
}

impl Confirm {
    pub fn new(cbt: Option<[u8; CBT_LEN]>) -> Self {
        Confirm { cbt }
    }

    pub fn parse(input: &[u8], has_cbt: bool) -> IResult<&[u8], Confirm> {
        if !has_cbt {
            return Ok((input, Confirm { cbt: None }));
        }
        let (input, cbt) = parse_array::<CBT_LEN>(input)?;
        Ok((input, Confirm { cbt: Some(cbt) }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        if let Some(cbt) = &self.cbt {
            output.extend_from_slice(cbt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let confirm = Confirm::new(Some([0x44; CBT_LEN]));

        let mut serialized = Vec::new();
        confirm.serialize(&mut serialized);
        assert_eq!(serialized, [0x44; CBT_LEN]);

        let (rest, parsed) = Confirm::parse(&serialized, true).unwrap();
        assert_eq!(parsed, confirm);
        assert!(rest.is_empty());
    }

    #[test]
    fn empty_without_cbt() {
        let mut serialized = Vec::new();
        Confirm::new(None).serialize(&mut serialized);
        assert!(serialized.is_empty());

        let (_, parsed) = Confirm::parse(&[], false).unwrap();
        assert_eq!(parsed.cbt, None);
    }
}
