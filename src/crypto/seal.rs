use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use super::keying::SessionKeys;
use crate::blob::Blob;
use crate::Error;

/// Encrypt `blob` under the delegation key.
///
/// `aad` is the transcript hash, binding the ciphertext to this handshake.
pub(crate) fn seal(keys: &SessionKeys, aad: &[u8], blob: &Blob) -> Result<Vec<u8>, Error> {
    let mut plaintext = Zeroizing::new(Vec::new());
    blob.serialize(&mut plaintext);

    let cipher = Aes256Gcm::new_from_slice(keys.delegation_key())
        .map_err(|_| Error::CryptoError("Invalid delegation key".to_string()))?;

    cipher
        .encrypt(
            Nonce::from_slice(keys.iv()),
            Payload {
                msg: &plaintext,
                aad,
            },
        )
        .map_err(|_| Error::CryptoError("Blob encryption failed".to_string()))
}

/// Decrypt and decode a sealed blob.
///
/// A failed authentication is `Error::BadTag`, a bad encoding
/// `Error::MalformedBlob`.
pub(crate) fn open(keys: &SessionKeys, aad: &[u8], sealed: &[u8]) -> Result<Blob, Error> {
    let cipher = Aes256Gcm::new_from_slice(keys.delegation_key())
        .map_err(|_| Error::CryptoError("Invalid delegation key".to_string()))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(keys.iv()), Payload { msg: sealed, aad })
        .map_err(|_| Error::BadTag)?;
    let plaintext = Zeroizing::new(plaintext);

    match Blob::parse(&plaintext) {
        Ok((rest, blob)) if rest.is_empty() => Ok(blob),
        _ => Err(Error::MalformedBlob),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::NONCE_LEN;

    fn keys(secret: u8) -> SessionKeys {
        SessionKeys::derive(&[secret; 32], &[1; NONCE_LEN], &[2; NONCE_LEN], &[3; 32]).unwrap()
    }

    #[test]
    fn seal_and_open() {
        let keys = keys(9);
        let blob = Blob::new("Basic", b"username:password".to_vec()).unwrap();

        let sealed = seal(&keys, b"transcript", &blob).unwrap();
        // name_len + name + data_len + data + GCM tag
        assert_eq!(sealed.len(), 2 + 5 + 2 + 17 + 16);
        assert!(!sealed
            .windows(b"password".len())
            .any(|w| w == b"password"));

        let opened = open(&keys, b"transcript", &sealed).unwrap();
        assert_eq!(opened, blob);
    }

    #[test]
    fn open_fails_on_wrong_key_or_aad() {
        let blob = Blob::new("Basic", b"a:b".to_vec()).unwrap();
        let sealed = seal(&keys(9), b"transcript", &blob).unwrap();

        assert_eq!(
            open(&keys(10), b"transcript", &sealed).unwrap_err(),
            Error::BadTag
        );
        assert_eq!(
            open(&keys(9), b"other", &sealed).unwrap_err(),
            Error::BadTag
        );

        let mut flipped = sealed.clone();
        flipped[0] ^= 0x80;
        assert_eq!(
            open(&keys(9), b"transcript", &flipped).unwrap_err(),
            Error::BadTag
        );
    }
}
