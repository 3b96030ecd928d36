//! Session key derivation.
//!
//! Both sides run HKDF-SHA256 over the Diffie-Hellman secret with the two
//! nonces as salt. The transcript hash of Initiate and Offer is mixed into
//! every expand step, so keys are bound to the negotiated group and both
//! public keys.

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::message::NONCE_LEN;
use crate::Error;

/// Length of the delegation and integrity keys.
pub const KEY_LEN: usize = 32;

/// Length of the nonce sealing the delegated blob.
pub const IV_LEN: usize = 12;

const DELEGATION_KEY_LABEL: &[u8] = b"srd delegation key";
const INTEGRITY_KEY_LABEL: &[u8] = b"srd integrity key";
const DELEGATION_IV_LABEL: &[u8] = b"srd delegation iv";

/// Keys shared by both parties once the key exchange is done.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SessionKeys {
    delegation_key: [u8; KEY_LEN],
    integrity_key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl SessionKeys {
    /// Derive the session keys.
    ///
    /// `context` is the transcript hash over the first two messages.
    pub fn derive(
        shared_secret: &[u8],
        initiator_nonce: &[u8; NONCE_LEN],
        responder_nonce: &[u8; NONCE_LEN],
        context: &[u8],
    ) -> Result<SessionKeys, Error> {
        let mut salt = [0u8; NONCE_LEN * 2];
        salt[..NONCE_LEN].copy_from_slice(initiator_nonce);
        salt[NONCE_LEN..].copy_from_slice(responder_nonce);

        let hk = Hkdf::<Sha256>::new(Some(&salt), shared_secret);

        let mut keys = SessionKeys {
            delegation_key: [0; KEY_LEN],
            integrity_key: [0; KEY_LEN],
            iv: [0; IV_LEN],
        };

        expand(&hk, DELEGATION_KEY_LABEL, context, &mut keys.delegation_key)?;
        expand(&hk, INTEGRITY_KEY_LABEL, context, &mut keys.integrity_key)?;
        expand(&hk, DELEGATION_IV_LABEL, context, &mut keys.iv)?;

        Ok(keys)
    }

    pub fn delegation_key(&self) -> &[u8; KEY_LEN] {
        &self.delegation_key
    }

    pub fn integrity_key(&self) -> &[u8; KEY_LEN] {
        &self.integrity_key
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

fn expand(hk: &Hkdf<Sha256>, label: &[u8], context: &[u8], out: &mut [u8]) -> Result<(), Error> {
    hk.expand_multi_info(&[label, context], out)
        .map_err(|e| Error::CryptoError(format!("HKDF expand failed: {:?}", e)))
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionKeys")
    }
}
