//! Named credential blobs.
//!
//! A [`Blob`] is the credential an initiator delegates: a scheme name such as
//! `"Basic"` plus opaque bytes. Typed credentials implement
//! [`CredentialBlob`] and convert to and from a raw blob.

use std::fmt;
use std::str;

use nom::bytes::complete::take;
use nom::number::complete::le_u16;
use nom::IResult;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::message::TAG_LEN;
use crate::Error;

/// Longest blob name in bytes.
pub const MAX_BLOB_NAME_LEN: usize = 255;

/// Longest blob payload in bytes.
///
/// A one byte name with this payload fills a Delegate message of the largest
/// length a header can declare. Smaller `max_message_len` settings lower the
/// practical limit further.
pub const MAX_BLOB_DATA_LEN: usize = u16::MAX as usize - DELEGATE_OVERHEAD - 1;

/// Delegate message bytes beyond the blob name and payload: the sealed
/// vec16 prefix, the two blob length fields, the GCM tag and the transcript
/// tag.
pub(crate) const DELEGATE_OVERHEAD: usize = 2 + 2 + 2 + 16 + TAG_LEN;

/// Named opaque credential payload.
///
/// The payload is wiped from memory when the blob is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Blob {
    name: String,
    data: Vec<u8>,
}

impl Blob {
    /// Create a blob from a scheme name and payload.
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Result<Blob, Error> {
        let name = name.into();
        let data = data.into();

        if name.is_empty() || name.len() > MAX_BLOB_NAME_LEN {
            return Err(Error::InvalidBlobName);
        }

        if data.len() > MAX_BLOB_DATA_LEN {
            return Err(Error::BlobTooLong(data.len()));
        }

        Ok(Blob { name, data })
    }

    /// Create a blob from a raw, not yet validated, name.
    ///
    /// Fails with `Error::InvalidBlobName` if the name is not UTF-8.
    pub fn from_raw(name: &[u8], data: &[u8]) -> Result<Blob, Error> {
        let name = str::from_utf8(name).map_err(|_| Error::InvalidBlobName)?;
        Blob::new(name, data)
    }

    /// Encode a typed credential into a blob.
    pub fn from_credential<T: CredentialBlob>(credential: &T) -> Result<Blob, Error> {
        Blob::new(T::NAME, credential.encode()?)
    }

    /// Decode the payload as a typed credential.
    ///
    /// Returns `Ok(None)` if this blob carries another scheme.
    pub fn to_credential<T: CredentialBlob>(&self) -> Result<Option<T>, Error> {
        if self.name != T::NAME {
            return Ok(None);
        }
        T::decode(&self.data).map(Some)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Declared length, tags included, of the Delegate message carrying
    /// this blob.
    pub(crate) fn delegate_len(&self) -> usize {
        self.name.len() + self.data.len() + DELEGATE_OVERHEAD
    }

    pub(crate) fn parse(input: &[u8]) -> IResult<&[u8], Blob> {
        let (input, name_len) = le_u16(input)?;
        let (input, name) = take(name_len as usize)(input)?;
        let (input, data_len) = le_u16(input)?;
        let (input, data) = take(data_len as usize)(input)?;

        let Ok(blob) = Blob::from_raw(name, data) else {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Verify,
            )));
        };

        Ok((input, blob))
    }

    pub(crate) fn serialize(&self, output: &mut Vec<u8>) {
        // Lengths are bounded in Blob::new.
        output.extend_from_slice(&(self.name.len() as u16).to_le_bytes());
        output.extend_from_slice(self.name.as_bytes());
        output.extend_from_slice(&(self.data.len() as u16).to_le_bytes());
        output.extend_from_slice(&self.data);
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("name", &self.name)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// A credential type with a fixed blob name and payload encoding.
pub trait CredentialBlob: Sized {
    /// Blob name identifying the scheme.
    const NAME: &'static str;

    /// Encode into the blob payload.
    ///
    /// Fails with `Error::BlobTooLong` if a field does not fit its encoding.
    fn encode(&self) -> Result<Vec<u8>, Error>;

    /// Decode from a blob payload.
    fn decode(data: &[u8]) -> Result<Self, Error>;
}

/// Username and password, encoded as `username:password`.
///
/// The username must not contain `:`; the password may.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BasicBlob {
    pub username: String,
    pub password: String,
}

impl BasicBlob {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        BasicBlob {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialBlob for BasicBlob {
    const NAME: &'static str = "Basic";

    fn encode(&self) -> Result<Vec<u8>, Error> {
        Ok(format!("{}:{}", self.username, self.password).into_bytes())
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let text = str::from_utf8(data).map_err(|_| Error::MalformedBlob)?;
        let (username, password) = text.split_once(':').ok_or(Error::MalformedBlob)?;
        Ok(BasicBlob::new(username, password))
    }
}

impl fmt::Debug for BasicBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicBlob")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Domain logon credentials.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct LogonBlob {
    pub domain: String,
    pub username: String,
    pub password: String,
}

impl LogonBlob {
    pub fn new(
        domain: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        LogonBlob {
            domain: domain.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

fn parse_text(input: &[u8]) -> IResult<&[u8], &str> {
    let (input, len) = le_u16(input)?;
    let (input, bytes) = take(len as usize)(input)?;
    match str::from_utf8(bytes) {
        Ok(s) => Ok((input, s)),
        Err(_) => Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        ))),
    }
}

fn parse_logon(input: &[u8]) -> IResult<&[u8], (&str, &str, &str)> {
    let (input, domain) = parse_text(input)?;
    let (input, username) = parse_text(input)?;
    let (input, password) = parse_text(input)?;
    Ok((input, (domain, username, password)))
}

fn serialize_text(text: &str, output: &mut Vec<u8>) -> Result<(), Error> {
    let len = u16::try_from(text.len()).map_err(|_| Error::BlobTooLong(text.len()))?;
    output.extend_from_slice(&len.to_le_bytes());
    output.extend_from_slice(text.as_bytes());
    Ok(())
}

impl CredentialBlob for LogonBlob {
    const NAME: &'static str = "Logon";

    fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        serialize_text(&self.domain, &mut out)?;
        serialize_text(&self.username, &mut out)?;
        serialize_text(&self.password, &mut out)?;
        Ok(out)
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let parsed = parse_logon(data);

        match parsed {
            Ok((rest, (domain, username, password))) if rest.is_empty() => {
                Ok(LogonBlob::new(domain, username, password))
            }
            _ => Err(Error::MalformedBlob),
        }
    }
}

impl fmt::Debug for LogonBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogonBlob")
            .field("domain", &self.domain)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
