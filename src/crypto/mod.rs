//! Cryptographic primitives and helpers used by the SRD handshake.
//!
//! - [`key_exchange`]: ephemeral X25519 or MODP Diffie-Hellman.
//! - [`keying`]: HKDF-SHA256 derivation of the delegation and integrity keys.
//! - [`transcript`]: running transcript hash and per-message tags.
//! - [`channel_binding`]: tokens binding the handshake to a certificate.
//! - [`seal`]: AES-256-GCM protection of the delegated blob.

pub(crate) mod channel_binding;
pub(crate) mod key_exchange;
pub(crate) mod keying;
pub(crate) mod seal;
pub(crate) mod transcript;

pub use keying::{IV_LEN, KEY_LEN};

use hmac::Hmac;
use sha2::Sha256;

pub(crate) type HmacSha256 = Hmac<Sha256>;
