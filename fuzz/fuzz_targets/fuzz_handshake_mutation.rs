#![no_main]

//! Fuzz target mutating one message of an otherwise honest handshake.
//!
//! The first input byte picks the message, the rest is XORed over it.
//! Any change must fail the receiving party.

use libfuzzer_sys::fuzz_target;

use srd::{Context, Role, State};

fuzz_target!(|data: &[u8]| {
    let Some((&target, mask)) = data.split_first() else {
        return;
    };
    let target = (target % 5) as usize;

    let mut initiator = Context::new(Role::Initiator);
    let mut responder = Context::new(Role::Responder);
    if initiator.set_blob_raw(b"Basic", b"user:pass").is_err() {
        return;
    }

    let mut message = Vec::new();
    let mut mutated = false;
    for turn in 0..6 {
        let party = if turn % 2 == 0 {
            &mut initiator
        } else {
            &mut responder
        };

        let status = party.input(&message);
        if status.is_error() {
            // Only the receiver of the mutated message may fail.
            assert_eq!(turn, target + 1);
            return;
        }

        let Some(mut next) = party.output() else {
            break;
        };

        if turn == target {
            for (byte, m) in next.iter_mut().zip(mask) {
                *byte ^= m;
                mutated |= *m != 0;
            }
        }
        message = next;
    }

    // A mutated handshake never completes.
    assert!(!mutated || responder.state() != State::Complete);
});
