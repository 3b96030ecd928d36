#![no_main]

//! Fuzz target for the first message each party parses.
//!
//! SRD message format:
//! - Signature: 4 bytes ("SRD\0")
//! - Type: 1 byte (1-5 valid values)
//! - Sequence: 1 byte (type - 1)
//! - Flags: 2 bytes (only 0x0001 defined)
//! - Length: 2 bytes, little-endian
//! - Body and 32 byte tag: `length` bytes

use libfuzzer_sys::fuzz_target;

use srd::{Context, Role};

const SIGNATURE: &[u8] = b"SRD\0";

fuzz_target!(|data: &[u8]| {
    // Raw input to a fresh responder.
    let mut responder = Context::new(Role::Responder);
    let status = responder.input(data);
    if status.is_error() {
        assert!(responder.output().is_none());
    }

    // Raw input as the Offer an initiator waits for.
    let mut initiator = Context::new(Role::Initiator);
    let _ = initiator.input(&[]);
    let _ = initiator.output();
    let _ = initiator.input(data);

    // Same bytes behind a valid signature, so parsing gets past the magic.
    let mut message = Vec::with_capacity(SIGNATURE.len() + data.len());
    message.extend_from_slice(SIGNATURE);
    message.extend_from_slice(data);

    let mut responder = Context::new(Role::Responder);
    let _ = responder.input(&message);
});
