//! Small shared types used across the codec and the state machine.

use std::fmt;

use nom::number::complete::le_u16;
use nom::IResult;

// ============================================================================
// Role
// ============================================================================

/// Which side of the handshake a context plays. Fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Speaks first and delegates its blob (the client).
    Initiator,
    /// Answers and receives the blob (the server).
    Responder,
}

impl Role {
    /// Binding-level constructor argument, `isServer`.
    pub fn from_is_server(is_server: bool) -> Self {
        if is_server {
            Role::Responder
        } else {
            Role::Initiator
        }
    }

    pub fn is_initiator(&self) -> bool {
        matches!(self, Role::Initiator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Initiator => write!(f, "initiator"),
            Role::Responder => write!(f, "responder"),
        }
    }
}

// ============================================================================
// Named Groups (Key Exchange)
// ============================================================================

/// Key exchange groups an SRD handshake can run over.
///
/// The wire values follow the TLS named group registry. The finite field
/// groups take the ffdhe code points of the same size but use the RFC 3526
/// primes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedGroup {
    /// X25519 (Curve25519 ECDH).
    X25519,
    /// 2048-bit MODP finite field group (RFC 3526, group 14).
    Modp2048,
    /// 4096-bit MODP finite field group (RFC 3526, group 16).
    Modp4096,
    /// 8192-bit MODP finite field group (RFC 3526, group 18).
    Modp8192,
    /// Unknown or unsupported group.
    Unknown(u16),
}

impl NamedGroup {
    /// Convert a wire format u16 value to a `NamedGroup`.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x001D => NamedGroup::X25519,
            0x0100 => NamedGroup::Modp2048,
            0x0102 => NamedGroup::Modp4096,
            0x0104 => NamedGroup::Modp8192,
            _ => NamedGroup::Unknown(value),
        }
    }

    /// Convert this `NamedGroup` to its wire format u16 value.
    pub fn as_u16(&self) -> u16 {
        match self {
            NamedGroup::X25519 => 0x001D,
            NamedGroup::Modp2048 => 0x0100,
            NamedGroup::Modp4096 => 0x0102,
            NamedGroup::Modp8192 => 0x0104,
            NamedGroup::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], NamedGroup> {
        let (input, value) = le_u16(input)?;
        Ok((input, NamedGroup::from_u16(value)))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(&self.as_u16().to_le_bytes());
    }

    /// Length in bytes of a public key in this group.
    pub fn public_key_len(&self) -> Option<usize> {
        match self {
            NamedGroup::X25519 => Some(32),
            NamedGroup::Modp2048 => Some(256),
            NamedGroup::Modp4096 => Some(512),
            NamedGroup::Modp8192 => Some(1024),
            NamedGroup::Unknown(_) => None,
        }
    }

    /// Whether this group is implemented.
    pub fn is_supported(&self) -> bool {
        Self::supported().contains(self)
    }

    /// All implemented groups, in order of preference.
    pub const fn supported() -> &'static [NamedGroup] {
        &[
            NamedGroup::X25519,
            NamedGroup::Modp2048,
            NamedGroup::Modp4096,
            NamedGroup::Modp8192,
        ]
    }
}
