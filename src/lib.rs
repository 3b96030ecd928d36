//! srd
//!
//! Sans-IO implementation of the SRD (Secure Remote Delegation) handshake:
//! two parties authenticate an ephemeral key exchange, optionally bind it to
//! a channel certificate, and the initiator delegates one named credential
//! blob to the responder. Both sides end with the same delegation and
//! integrity keys.
//!
//! A [`Context`] is one party. It never touches the network: feed it the
//! peer's bytes with [`Context::input`] and send whatever
//! [`Context::output`] hands back.
//!
//! ```
//! use srd::{BasicBlob, Context, Role, Status};
//!
//! let mut client = Context::new(Role::Initiator);
//! let mut server = Context::new(Role::Responder);
//! client.set_credential(&BasicBlob::new("username", "password")).unwrap();
//!
//! let mut message = Vec::new();
//! let mut client_turn = true;
//! loop {
//!     let party = if client_turn { &mut client } else { &mut server };
//!     let status = party.input(&message);
//!     assert!(!status.is_error());
//!
//!     match party.output() {
//!         Some(next) => message = next,
//!         None => break,
//!     }
//!     client_turn = !client_turn;
//! }
//!
//! assert_eq!(client.delegation_key(), server.delegation_key());
//! assert_eq!(server.blob_name(), Some("Basic"));
//!
//! let basic: BasicBlob = server.peer_credential().unwrap().unwrap();
//! assert_eq!(basic.password, "password");
//! ```
//!
//! [`driver::Driver`] runs the same loop over explicit channels, and
//! [`compat::Handle`] offers the integer status, two-call buffer surface of
//! the native bindings.

#![forbid(unsafe_code)]
#![warn(clippy::all)]
// #![deny(missing_docs)]

#[macro_use]
extern crate log;

mod blob;
pub use blob::{BasicBlob, Blob, CredentialBlob, LogonBlob, MAX_BLOB_DATA_LEN, MAX_BLOB_NAME_LEN};

mod config;
pub use config::{Config, ConfigBuilder};

mod context;
pub use context::{Context, State, Status};

mod crypto;
pub use crypto::{IV_LEN, KEY_LEN};

mod error;
pub use error::Error;

pub(crate) mod message;
pub use message::MessageType;

mod types;
pub use types::{NamedGroup, Role};

pub mod compat;
pub mod driver;
