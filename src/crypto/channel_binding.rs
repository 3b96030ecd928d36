use hmac::Mac;

use super::HmacSha256;
use crate::message::{CBT_LEN, NONCE_LEN};
use crate::types::Role;
use crate::Error;

const INITIATOR_LABEL: &[u8] = b"srd cbt initiator";
const RESPONDER_LABEL: &[u8] = b"srd cbt responder";

/// Channel binding token `role` sends for certificate `cert`.
///
/// The label keeps a token from being reflected back by the peer.
pub(crate) fn token(
    integrity_key: &[u8],
    role: Role,
    nonce: &[u8; NONCE_LEN],
    cert: &[u8],
) -> Result<[u8; CBT_LEN], Error> {
    Ok(mac(integrity_key, role, nonce, cert)?
        .finalize()
        .into_bytes()
        .into())
}

/// Check a token received from a peer playing `role`.
///
/// Both sides must agree on whether channel binding is in use.
pub(crate) fn verify(
    integrity_key: &[u8],
    role: Role,
    nonce: &[u8; NONCE_LEN],
    cert: Option<&[u8]>,
    received: Option<&[u8; CBT_LEN]>,
) -> Result<(), Error> {
    match (cert, received) {
        (None, None) => Ok(()),
        (Some(cert), Some(received)) => mac(integrity_key, role, nonce, cert)?
            .verify_slice(received)
            .map_err(|_| Error::InvalidChannelBinding),
        _ => Err(Error::ChannelBindingMismatch),
    }
}

fn mac(
    integrity_key: &[u8],
    role: Role,
    nonce: &[u8; NONCE_LEN],
    cert: &[u8],
) -> Result<HmacSha256, Error> {
    let label = match role {
        Role::Initiator => INITIATOR_LABEL,
        Role::Responder => RESPONDER_LABEL,
    };

    let mut mac = <HmacSha256 as Mac>::new_from_slice(integrity_key)
        .map_err(|_| Error::CryptoError("Invalid HMAC key".to_string()))?;
    mac.update(label);
    mac.update(nonce);
    mac.update(cert);
    Ok(mac)
}
