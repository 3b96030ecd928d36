//! Shared helpers for SRD integration tests.
//!
//! This file has no `#[test]` functions; Cargo compiles it as a no-op binary.
//! Import it from other test files via `mod srd_common;`.

#![allow(unused)]

use std::sync::Arc;

use srd::{Config, Context, Role, Status};

/// Message type bytes, at offset 4 of every message.
pub const INITIATE: u8 = 1;
pub const OFFER: u8 = 2;
pub const ACCEPT: u8 = 3;
pub const CONFIRM: u8 = 4;
pub const DELEGATE: u8 = 5;

/// Initiator with a Basic blob and a responder, both on default config.
pub fn basic_pair() -> (Context, Context) {
    let mut initiator = Context::new(Role::Initiator);
    initiator.set_blob_raw(b"Basic", b"username:password").unwrap();
    (initiator, Context::new(Role::Responder))
}

/// Pair sharing one configuration.
pub fn pair_with_config(config: Config) -> (Context, Context) {
    let config = Arc::new(config);
    (
        Context::with_config(Role::Initiator, Arc::clone(&config)),
        Context::with_config(Role::Responder, config),
    )
}

/// Statuses and messages of one run, in order.
pub struct Run {
    pub statuses: Vec<Status>,
    pub messages: Vec<Vec<u8>>,
}

/// Alternate input/output until a party has nothing more to send or fails.
///
/// `tamper` may modify message `n` before delivery.
pub fn exchange(
    initiator: &mut Context,
    responder: &mut Context,
    mut tamper: impl FnMut(usize, &mut Vec<u8>),
) -> Run {
    let mut statuses = Vec::new();
    let mut messages = Vec::new();
    let mut message = Vec::new();

    for turn in 0..8 {
        let party = if turn % 2 == 0 {
            &mut *initiator
        } else {
            &mut *responder
        };

        let status = party.input(&message);
        let failed = status.is_error();
        statuses.push(status);
        if failed {
            break;
        }

        match party.output() {
            Some(mut next) => {
                messages.push(next.clone());
                tamper(messages.len() - 1, &mut next);
                message = next;
            }
            None => break,
        }
    }

    Run { statuses, messages }
}

/// Run an untouched handshake.
pub fn honest(initiator: &mut Context, responder: &mut Context) -> Run {
    exchange(initiator, responder, |_, _| {})
}
