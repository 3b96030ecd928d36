use hmac::Mac;
use sha2::{Digest, Sha256};

use super::HmacSha256;
use crate::message::TAG_LEN;
use crate::Error;

/// Running hash over every full message exchanged so far.
///
/// Each message ends in a tag over the transcript and the message itself.
/// Before keys exist the tag is a plain SHA-256 digest. Afterwards it is an
/// HMAC keyed with the integrity key.
#[derive(Clone)]
pub(crate) struct Transcript {
    hasher: Sha256,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript {
            hasher: Sha256::new(),
        }
    }

    /// Append a full message, tag included.
    pub fn push(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    /// Hash of the transcript so far. This clones the state, so it is
    /// possible to continue pushing.
    pub fn hash(&self) -> [u8; TAG_LEN] {
        self.hasher.clone().finalize().into()
    }

    /// Tag for `unsigned`, the next message without its tag.
    pub fn tag(&self, key: Option<&[u8]>, unsigned: &[u8]) -> Result<[u8; TAG_LEN], Error> {
        match key {
            None => {
                let mut hasher = self.hasher.clone();
                hasher.update(unsigned);
                Ok(hasher.finalize().into())
            }
            Some(key) => {
                let mac = self.mac(key, unsigned)?;
                Ok(mac.finalize().into_bytes().into())
            }
        }
    }

    /// Check the tag on a received message.
    pub fn verify(&self, key: Option<&[u8]>, unsigned: &[u8], tag: &[u8]) -> Result<(), Error> {
        match key {
            None => {
                if self.tag(None, unsigned)?[..] != *tag {
                    return Err(Error::BadTag);
                }
                Ok(())
            }
            Some(key) => self
                .mac(key, unsigned)?
                .verify_slice(tag)
                .map_err(|_| Error::BadTag),
        }
    }

    fn mac(&self, key: &[u8], unsigned: &[u8]) -> Result<HmacSha256, Error> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
            .map_err(|_| Error::CryptoError("Invalid HMAC key".to_string()))?;
        mac.update(&self.hash());
        mac.update(unsigned);
        Ok(mac)
    }
}
