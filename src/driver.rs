//! Couple two contexts and run a handshake to completion.
//!
//! The contexts never share memory. Every message travels through a
//! [`Channel`], which is where tests can drop, delay or alter traffic.

use std::collections::VecDeque;

use thiserror::Error;

use crate::context::{Context, State, Status};
use crate::types::Role;
use crate::Error;

/// Turn limit. An honest handshake needs six turns.
pub const MAX_ROUNDS: usize = 8;

/// One direction of message transport.
pub trait Channel {
    /// Queue a message for the receiving party.
    fn send(&mut self, message: Vec<u8>);

    /// Next message for the receiving party, if any.
    fn recv(&mut self) -> Option<Vec<u8>>;
}

/// In-memory FIFO channel.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    queue: VecDeque<Vec<u8>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        MemoryChannel::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Channel for MemoryChannel {
    fn send(&mut self, message: Vec<u8>) {
        self.queue.push_back(message);
    }

    fn recv(&mut self) -> Option<Vec<u8>> {
        self.queue.pop_front()
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Number of `input` calls made across both parties.
    pub rounds: usize,

    /// Number of messages carried by the channels.
    pub messages: usize,
}

/// Why a run did not end with both parties complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("The {role} failed: {error}")]
    Failed { role: Role, error: Error },

    #[error("Handshake stalled with initiator {initiator:?} and responder {responder:?}")]
    Asymmetric { initiator: State, responder: State },

    #[error("No completion within {0} rounds")]
    RoundLimit(usize),
}

/// Alternates `input`/`output` between an initiator and a responder.
pub struct Driver<C: Channel = MemoryChannel> {
    to_responder: C,
    to_initiator: C,
    max_rounds: usize,
}

impl Driver<MemoryChannel> {
    pub fn new() -> Self {
        Driver::with_channels(MemoryChannel::new(), MemoryChannel::new())
    }
}

impl Default for Driver<MemoryChannel> {
    fn default() -> Self {
        Driver::new()
    }
}

impl<C: Channel> Driver<C> {
    /// Run over custom channels, one per direction.
    pub fn with_channels(to_responder: C, to_initiator: C) -> Self {
        Driver {
            to_responder,
            to_initiator,
            max_rounds: MAX_ROUNDS,
        }
    }

    /// Set the turn limit.
    ///
    /// Defaults to [`MAX_ROUNDS`].
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Channel carrying initiator messages.
    pub fn to_responder(&self) -> &C {
        &self.to_responder
    }

    /// Channel carrying responder messages.
    pub fn to_initiator(&self) -> &C {
        &self.to_initiator
    }

    /// Run the handshake until both parties succeed or one fails.
    ///
    /// The initiator starts with an empty input. Each turn feeds the active
    /// party the next message from its channel and forwards its output.
    pub fn run(
        &mut self,
        initiator: &mut Context,
        responder: &mut Context,
    ) -> Result<Outcome, DriverError> {
        let mut initiator_done = false;
        let mut responder_done = false;
        let mut rounds = 0;
        let mut messages = 0;

        for turn in 0..self.max_rounds {
            if initiator_done && responder_done {
                break;
            }

            let initiator_turn = turn % 2 == 0;
            let (party, done, inbox, outbox) = if initiator_turn {
                (
                    &mut *initiator,
                    &mut initiator_done,
                    &mut self.to_initiator,
                    &mut self.to_responder,
                )
            } else {
                (
                    &mut *responder,
                    &mut responder_done,
                    &mut self.to_responder,
                    &mut self.to_initiator,
                )
            };

            if *done {
                continue;
            }

            let message = if turn == 0 {
                Vec::new()
            } else {
                match inbox.recv() {
                    Some(m) => m,
                    None => {
                        return Err(DriverError::Asymmetric {
                            initiator: initiator.state(),
                            responder: responder.state(),
                        })
                    }
                }
            };

            rounds += 1;
            match party.input(&message) {
                Status::Continue => {}
                Status::Success => *done = true,
                Status::Error(error) => {
                    return Err(DriverError::Failed {
                        role: party.role(),
                        error,
                    })
                }
            }

            if let Some(output) = party.output() {
                trace!("{} -> {} bytes", party.role(), output.len());
                outbox.send(output);
                messages += 1;
            }
        }

        if !(initiator_done && responder_done) {
            return Err(DriverError::RoundLimit(self.max_rounds));
        }

        debug!("Handshake complete after {} rounds", rounds);
        Ok(Outcome { rounds, messages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Context, Context) {
        let mut initiator = Context::new(Role::Initiator);
        initiator.set_blob_raw(b"Basic", b"user:pass").unwrap();
        (initiator, Context::new(Role::Responder))
    }

    #[test]
    fn memory_channel_is_fifo() {
        let mut channel = MemoryChannel::new();
        assert!(channel.is_empty());
        channel.send(vec![1]);
        channel.send(vec![2]);
        assert_eq!(channel.len(), 2);
        assert_eq!(channel.recv(), Some(vec![1]));
        assert_eq!(channel.recv(), Some(vec![2]));
        assert_eq!(channel.recv(), None);
    }

    #[test]
    fn honest_run() {
        let (mut initiator, mut responder) = pair();
        let outcome = Driver::new().run(&mut initiator, &mut responder).unwrap();

        assert_eq!(outcome, Outcome { rounds: 6, messages: 5 });
        assert_eq!(initiator.state(), State::Complete);
        assert_eq!(responder.state(), State::Complete);
    }

    #[test]
    fn round_limit() {
        let (mut initiator, mut responder) = pair();
        let err = Driver::new()
            .max_rounds(4)
            .run(&mut initiator, &mut responder)
            .unwrap_err();
        assert_eq!(err, DriverError::RoundLimit(4));
    }

    #[test]
    fn failure_names_the_party() {
        let mut initiator = Context::new(Role::Initiator);
        let mut responder = Context::new(Role::Responder);

        let err = Driver::new()
            .run(&mut initiator, &mut responder)
            .unwrap_err();
        assert_eq!(
            err,
            DriverError::Failed {
                role: Role::Initiator,
                error: Error::MissingBlob,
            }
        );
    }

    /// Loses every message after the first `keep`.
    struct Lossy {
        inner: MemoryChannel,
        keep: usize,
    }

    impl Channel for Lossy {
        fn send(&mut self, message: Vec<u8>) {
            if self.keep > 0 {
                self.keep -= 1;
                self.inner.send(message);
            }
        }

        fn recv(&mut self) -> Option<Vec<u8>> {
            self.inner.recv()
        }
    }

    #[test]
    fn lost_message_stalls() {
        let (mut initiator, mut responder) = pair();
        let to_responder = Lossy {
            inner: MemoryChannel::new(),
            keep: 2,
        };
        let to_initiator = Lossy {
            inner: MemoryChannel::new(),
            keep: 2,
        };

        let err = Driver::with_channels(to_responder, to_initiator)
            .run(&mut initiator, &mut responder)
            .unwrap_err();
        assert_eq!(
            err,
            DriverError::Asymmetric {
                initiator: State::Complete,
                responder: State::Exchanging,
            }
        );
    }
}
