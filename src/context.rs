// SRD Handshake Flow:
//
// 1. Initiator sends Initiate with the key exchange group it wants
// 2. Responder sends Offer: its ephemeral public key and nonce
// 3. Initiator sends Accept: its public key, nonce and optional channel
//    binding token. Both sides now derive the delegation and integrity keys.
// 4. Responder sends Confirm with its optional channel binding token
// 5. Initiator sends Delegate: the blob sealed under the delegation key
//
// Initiate and Offer end in a SHA-256 digest of the transcript, every later
// message in an HMAC keyed with the integrity key.
//
// This implementation is Sans-IO. Each `input` call consumes at most one
// peer message and leaves at most one message for `output`.

use std::fmt;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::blob::{Blob, CredentialBlob};
use crate::crypto::key_exchange::KeyExchange;
use crate::crypto::keying::SessionKeys;
use crate::crypto::transcript::Transcript;
use crate::crypto::{channel_binding, seal};
use crate::message::{
    Accept, Body, Confirm, Delegate, Initiate, Message, MessageType, Offer, NONCE_LEN,
};
use crate::types::{NamedGroup, Role};
use crate::{Config, Error};

/// Externally visible handshake state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No message processed yet.
    Created,
    /// Rounds in progress.
    Exchanging,
    /// Handshake done, keys available.
    Complete,
    /// Handshake aborted. Terminal.
    Failed,
}

/// Result of one [`Context::input`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// More rounds needed. Check [`Context::output`].
    Continue,
    /// Handshake complete for this party.
    Success,
    /// Handshake failed. Repeated for every later call.
    Error(Error),
}

impl Status {
    pub fn is_continue(&self) -> bool {
        matches!(self, Status::Continue)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

/// One party of an SRD handshake.
///
/// Drive it by alternating [`input`](Context::input) with the peer's last
/// message (empty for the initiator's first call) and
/// [`output`](Context::output) to fetch the next message to send.
pub struct Context {
    /// Which side we are. Fixed for the lifetime of the context.
    role: Role,

    config: Arc<Config>,

    /// Current position in the handshake.
    step: Step,

    /// Blob the initiator will delegate.
    local_blob: Option<Blob>,

    /// Set once the Delegate message is built.
    blob_sent: bool,

    /// Blob received by the responder.
    peer_blob: Option<Blob>,

    /// Certificate the channel binding tokens are computed over.
    cert_data: Option<Zeroizing<Vec<u8>>>,

    /// Produced by the last input, not yet taken by output.
    pending_output: Option<Vec<u8>>,

    transcript: Transcript,

    /// Responder's key pair between Offer and Accept.
    key_exchange: Option<KeyExchange>,

    /// Group agreed in Initiate/Offer.
    group: Option<NamedGroup>,

    initiator_nonce: [u8; NONCE_LEN],
    responder_nonce: [u8; NONCE_LEN],

    /// Derived once both key shares are known.
    keys: Option<SessionKeys>,

    /// Error that failed the handshake.
    failure: Option<Error>,
}

impl Context {
    /// Create a context with the default configuration.
    pub fn new(role: Role) -> Context {
        Context::with_config(role, Arc::new(Config::default()))
    }

    pub fn with_config(role: Role, config: Arc<Config>) -> Context {
        let step = match role {
            Role::Initiator => Step::SendInitiate,
            Role::Responder => Step::AwaitInitiate,
        };

        Context {
            role,
            config,
            step,
            local_blob: None,
            blob_sent: false,
            peer_blob: None,
            cert_data: None,
            pending_output: None,
            transcript: Transcript::new(),
            key_exchange: None,
            group: None,
            initiator_nonce: [0; NONCE_LEN],
            responder_nonce: [0; NONCE_LEN],
            keys: None,
            failure: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        match self.step {
            Step::SendInitiate | Step::AwaitInitiate => State::Created,
            Step::AwaitOffer | Step::AwaitConfirm | Step::AwaitAccept | Step::AwaitDelegate => {
                State::Exchanging
            }
            Step::Complete => State::Complete,
            Step::Failed => State::Failed,
        }
    }

    /// Set the blob to delegate.
    ///
    /// Only an initiator asserts a blob, and only until the Delegate message
    /// has been produced. A previously set blob is replaced. A blob whose
    /// Delegate message would exceed `max_message_len` is refused with
    /// `Error::BlobTooLong` and the previous blob is kept.
    pub fn set_blob(&mut self, blob: Blob) -> Result<(), Error> {
        if self.step == Step::Failed {
            return Err(Error::WrongState);
        }
        if !self.role.is_initiator() {
            return Err(Error::NotInitiator);
        }
        if self.blob_sent {
            return Err(Error::BlobAlreadySent);
        }
        if blob.delegate_len() > self.config.max_message_len() {
            debug!(
                "Blob needs a {} byte Delegate, limit is {}",
                blob.delegate_len(),
                self.config.max_message_len()
            );
            return Err(Error::BlobTooLong(blob.data().len()));
        }

        debug!("Blob set: {:?}", blob);
        self.local_blob = Some(blob);
        Ok(())
    }

    /// Set the blob from an unvalidated name and payload.
    ///
    /// On error the previous blob, if any, is kept.
    pub fn set_blob_raw(&mut self, name: &[u8], data: &[u8]) -> Result<(), Error> {
        let blob = Blob::from_raw(name, data)?;
        self.set_blob(blob)
    }

    /// Set a typed credential as the blob to delegate.
    pub fn set_credential<T: CredentialBlob>(&mut self, credential: &T) -> Result<(), Error> {
        let blob = Blob::from_credential(credential)?;
        self.set_blob(blob)
    }

    /// Bind the handshake to a certificate, typically the TLS server
    /// certificate of the connection carrying it.
    ///
    /// Must be called before the first input. Both parties have to set the
    /// same data, or neither.
    pub fn set_cert_data(&mut self, data: &[u8]) -> Result<(), Error> {
        match self.state() {
            State::Created => {}
            State::Failed => return Err(Error::WrongState),
            _ => return Err(Error::CertDataLocked),
        }

        self.cert_data = Some(Zeroizing::new(data.to_vec()));
        Ok(())
    }

    /// Process one message from the peer.
    ///
    /// The initiator starts with an empty message. Any error fails the
    /// context for good, except `Error::Finished`: input to a `Complete`
    /// context is refused but the context stays `Complete` and keeps its
    /// keys and peer blob.
    pub fn input(&mut self, message: &[u8]) -> Status {
        if let Some(error) = &self.failure {
            return Status::Error(error.clone());
        }

        if self.step == Step::Complete {
            return Status::Error(Error::Finished);
        }

        if self.pending_output.take().is_some() {
            warn!("Dropping unsent {} message", self.role);
        }

        let prev_step = self.step;
        match prev_step.make_progress(self, message) {
            Ok(new_step) => {
                debug!("{} {:?} -> {:?}", self.role, prev_step, new_step);
                self.step = new_step;

                if new_step == Step::Complete {
                    Status::Success
                } else {
                    Status::Continue
                }
            }
            Err(error) => self.fail(error),
        }
    }

    /// Take the next message to send to the peer.
    ///
    /// `None` means there is nothing to send. A message is handed out once.
    pub fn output(&mut self) -> Option<Vec<u8>> {
        let output = self.pending_output.take();
        if let Some(output) = &output {
            trace!("{} output of {} bytes", self.role, output.len());
        }
        output
    }

    /// Peek at the next message without taking it.
    pub fn pending_output(&self) -> Option<&[u8]> {
        self.pending_output.as_deref()
    }

    /// Blob received from the peer.
    pub fn peer_blob(&self) -> Option<&Blob> {
        self.peer_blob.as_ref()
    }

    pub fn blob_name(&self) -> Option<&str> {
        self.peer_blob.as_ref().map(|b| b.name())
    }

    pub fn blob_data(&self) -> Option<&[u8]> {
        self.peer_blob.as_ref().map(|b| b.data())
    }

    /// Decode the received blob as credential `T`.
    ///
    /// `Ok(None)` if nothing was received or the blob has another name.
    pub fn peer_credential<T: CredentialBlob>(&self) -> Result<Option<T>, Error> {
        match &self.peer_blob {
            Some(blob) => blob.to_credential(),
            None => Ok(None),
        }
    }

    /// Delegation key, once the handshake is complete.
    pub fn delegation_key(&self) -> Option<&[u8]> {
        self.complete_keys().map(|k| &k.delegation_key()[..])
    }

    /// Integrity key, once the handshake is complete.
    pub fn integrity_key(&self) -> Option<&[u8]> {
        self.complete_keys().map(|k| &k.integrity_key()[..])
    }

    /// Error that failed the handshake, if it did.
    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    fn complete_keys(&self) -> Option<&SessionKeys> {
        if self.step != Step::Complete {
            return None;
        }
        self.keys.as_ref()
    }

    fn fail(&mut self, error: Error) -> Status {
        warn!("{} handshake failed in {:?}: {}", self.role, self.step, error);

        self.step = Step::Failed;
        self.failure = Some(error.clone());
        self.pending_output = None;
        self.key_exchange = None;
        self.keys = None;

        Status::Error(error)
    }

    /// Serialize, tag and record an outgoing message.
    fn send(&mut self, body: &Body, keyed: bool) -> Result<(), Error> {
        let key = match (&self.keys, keyed) {
            (Some(keys), true) => Some(&keys.integrity_key()[..]),
            (None, true) => return Err(Error::WrongState),
            (_, false) => None,
        };

        let mut message = Message::serialize_unsigned(body, self.config.max_message_len())?;
        let tag = self.transcript.tag(key, &message)?;
        message.extend_from_slice(&tag);

        self.transcript.push(&message);
        trace!(
            "{} sends {:?} ({} bytes)",
            self.role,
            body.message_type(),
            message.len()
        );
        self.pending_output = Some(message);

        Ok(())
    }

    fn cert_data(&self) -> Option<&[u8]> {
        self.cert_data.as_ref().map(|c| c.as_slice())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    // Initiator
    SendInitiate,
    AwaitOffer,
    AwaitConfirm,

    // Responder
    AwaitInitiate,
    AwaitAccept,
    AwaitDelegate,

    Complete,
    Failed,
}

impl Step {
    fn make_progress(self, ctx: &mut Context, input: &[u8]) -> Result<Self, Error> {
        match self {
            Step::SendInitiate => self.send_initiate(ctx, input),
            Step::AwaitOffer => self.await_offer(ctx, input),
            Step::AwaitConfirm => self.await_confirm(ctx, input),
            Step::AwaitInitiate => self.await_initiate(ctx, input),
            Step::AwaitAccept => self.await_accept(ctx, input),
            Step::AwaitDelegate => self.await_delegate(ctx, input),
            Step::Complete => Err(Error::Finished),
            Step::Failed => Err(Error::WrongState),
        }
    }

    fn send_initiate(self, ctx: &mut Context, input: &[u8]) -> Result<Self, Error> {
        if !input.is_empty() {
            return Err(Error::UnexpectedInput);
        }

        let group = ctx.config.key_exchange();
        ctx.group = Some(group);
        ctx.send(&Body::Initiate(Initiate::new(group)), false)?;

        Ok(Step::AwaitOffer)
    }

    fn await_offer(self, ctx: &mut Context, input: &[u8]) -> Result<Self, Error> {
        let message = Message::parse(input, ctx.config.max_message_len())?;
        let Body::Offer(Offer {
            group,
            public_key,
            nonce,
        }) = message.body
        else {
            return Err(unexpected(MessageType::Offer, &message));
        };

        ctx.transcript.verify(None, message.signed, message.tag)?;

        let requested = ctx.group.ok_or(Error::WrongState)?;
        if group != requested {
            return Err(Error::GroupMismatch(requested, group));
        }

        ctx.transcript.push(input);
        ctx.responder_nonce = nonce;
        OsRng.fill_bytes(&mut ctx.initiator_nonce);

        let mut key_exchange = KeyExchange::new(group)?;
        let shared_secret = key_exchange.compute_shared_secret(public_key)?;
        let keys = SessionKeys::derive(
            &shared_secret,
            &ctx.initiator_nonce,
            &ctx.responder_nonce,
            &ctx.transcript.hash(),
        )?;

        let cbt = match ctx.cert_data() {
            Some(cert) => Some(channel_binding::token(
                keys.integrity_key(),
                Role::Initiator,
                &ctx.initiator_nonce,
                cert,
            )?),
            None => None,
        };
        ctx.keys = Some(keys);

        let accept = Accept::new(group, key_exchange.public_key(), ctx.initiator_nonce, cbt);
        ctx.send(&Body::Accept(accept), true)?;

        Ok(Step::AwaitConfirm)
    }

    fn await_confirm(self, ctx: &mut Context, input: &[u8]) -> Result<Self, Error> {
        let message = Message::parse(input, ctx.config.max_message_len())?;
        let Body::Confirm(Confirm { cbt }) = message.body else {
            return Err(unexpected(MessageType::Confirm, &message));
        };

        let keys = ctx.keys.as_ref().ok_or(Error::WrongState)?;
        ctx.transcript
            .verify(Some(keys.integrity_key()), message.signed, message.tag)?;

        channel_binding::verify(
            keys.integrity_key(),
            Role::Responder,
            &ctx.responder_nonce,
            ctx.cert_data(),
            cbt.as_ref(),
        )?;

        ctx.transcript.push(input);

        let blob = ctx.local_blob.as_ref().ok_or(Error::MissingBlob)?;
        let sealed = seal::seal(keys, &ctx.transcript.hash(), blob)?;
        debug!("Delegating blob {:?}", blob.name());

        ctx.send(&Body::Delegate(Delegate::new(&sealed)), true)?;
        ctx.blob_sent = true;

        Ok(Step::Complete)
    }

    fn await_initiate(self, ctx: &mut Context, input: &[u8]) -> Result<Self, Error> {
        let message = Message::parse(input, ctx.config.max_message_len())?;
        let Body::Initiate(Initiate { group }) = message.body else {
            return Err(unexpected(MessageType::Initiate, &message));
        };

        ctx.transcript.verify(None, message.signed, message.tag)?;

        if !ctx.config.accepts_group(group) {
            return Err(Error::UnsupportedGroup(group));
        }

        ctx.transcript.push(input);
        ctx.group = Some(group);
        OsRng.fill_bytes(&mut ctx.responder_nonce);

        let key_exchange = KeyExchange::new(group)?;
        let public_key = key_exchange.public_key().to_vec();
        ctx.key_exchange = Some(key_exchange);

        let offer = Offer::new(group, &public_key, ctx.responder_nonce);
        ctx.send(&Body::Offer(offer), false)?;

        Ok(Step::AwaitAccept)
    }

    fn await_accept(self, ctx: &mut Context, input: &[u8]) -> Result<Self, Error> {
        let message = Message::parse(input, ctx.config.max_message_len())?;
        let Body::Accept(Accept {
            group,
            public_key,
            nonce,
            cbt,
        }) = message.body
        else {
            return Err(unexpected(MessageType::Accept, &message));
        };

        let agreed = ctx.group.ok_or(Error::WrongState)?;
        if group != agreed {
            return Err(Error::GroupMismatch(agreed, group));
        }

        // The tag is keyed, so the keys come first.
        let mut key_exchange = ctx.key_exchange.take().ok_or(Error::WrongState)?;
        let shared_secret = key_exchange.compute_shared_secret(public_key)?;
        let keys = SessionKeys::derive(
            &shared_secret,
            &nonce,
            &ctx.responder_nonce,
            &ctx.transcript.hash(),
        )?;

        ctx.transcript
            .verify(Some(keys.integrity_key()), message.signed, message.tag)?;

        channel_binding::verify(
            keys.integrity_key(),
            Role::Initiator,
            &nonce,
            ctx.cert_data(),
            cbt.as_ref(),
        )?;

        ctx.transcript.push(input);
        ctx.initiator_nonce = nonce;

        let cbt = match ctx.cert_data() {
            Some(cert) => Some(channel_binding::token(
                keys.integrity_key(),
                Role::Responder,
                &ctx.responder_nonce,
                cert,
            )?),
            None => None,
        };
        ctx.keys = Some(keys);

        ctx.send(&Body::Confirm(Confirm::new(cbt)), true)?;

        Ok(Step::AwaitDelegate)
    }

    fn await_delegate(self, ctx: &mut Context, input: &[u8]) -> Result<Self, Error> {
        let message = Message::parse(input, ctx.config.max_message_len())?;
        let Body::Delegate(Delegate { sealed }) = message.body else {
            return Err(unexpected(MessageType::Delegate, &message));
        };

        let keys = ctx.keys.as_ref().ok_or(Error::WrongState)?;
        ctx.transcript
            .verify(Some(keys.integrity_key()), message.signed, message.tag)?;

        let blob = seal::open(keys, &ctx.transcript.hash(), sealed)?;
        if !ctx.config.accepts_blob_name(blob.name()) {
            return Err(Error::BlobRejected(blob.name().to_string()));
        }

        ctx.transcript.push(input);
        debug!("Received blob {:?}", blob.name());
        ctx.peer_blob = Some(blob);

        Ok(Step::Complete)
    }
}

fn unexpected(expected: MessageType, message: &Message) -> Error {
    Error::UnexpectedMessage(expected, message.header.msg_type)
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("role", &self.role)
            .field("state", &self.state())
            .field("step", &self.step)
            .field("group", &self.group)
            .field("peer_blob", &self.peer_blob)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::BasicBlob;

    fn pair() -> (Context, Context) {
        (
            Context::new(Role::Initiator),
            Context::new(Role::Responder),
        )
    }

    /// Run the five messages, returning them for inspection.
    fn run(initiator: &mut Context, responder: &mut Context) -> Vec<Vec<u8>> {
        let mut messages = Vec::new();

        assert_eq!(initiator.input(&[]), Status::Continue);
        messages.push(initiator.output().unwrap());

        assert_eq!(responder.input(&messages[0]), Status::Continue);
        messages.push(responder.output().unwrap());

        assert_eq!(initiator.input(&messages[1]), Status::Continue);
        messages.push(initiator.output().unwrap());

        assert_eq!(responder.input(&messages[2]), Status::Continue);
        messages.push(responder.output().unwrap());

        assert_eq!(initiator.input(&messages[3]), Status::Success);
        messages.push(initiator.output().unwrap());

        assert_eq!(responder.input(&messages[4]), Status::Success);
        assert_eq!(responder.output(), None);

        messages
    }

    #[test]
    fn state_transitions() {
        let (mut initiator, mut responder) = pair();
        initiator
            .set_credential(&BasicBlob::new("username", "password"))
            .unwrap();
        assert_eq!(initiator.state(), State::Created);
        assert_eq!(responder.state(), State::Created);

        initiator.input(&[]);
        assert_eq!(initiator.state(), State::Exchanging);
        assert!(initiator.delegation_key().is_none());

        let initiate = initiator.output().unwrap();
        responder.input(&initiate);
        assert_eq!(responder.state(), State::Exchanging);

        let offer = responder.output().unwrap();
        initiator.input(&offer);
        let accept = initiator.output().unwrap();
        responder.input(&accept);

        // Keys exist internally, but are not handed out yet.
        assert!(responder.integrity_key().is_none());

        let confirm = responder.output().unwrap();
        initiator.input(&confirm);
        assert_eq!(initiator.state(), State::Complete);

        let delegate = initiator.output().unwrap();
        responder.input(&delegate);
        assert_eq!(responder.state(), State::Complete);

        assert_eq!(initiator.delegation_key(), responder.delegation_key());
        assert_eq!(responder.blob_name(), Some("Basic"));
    }

    #[test]
    fn message_types_in_order() {
        let (mut initiator, mut responder) = pair();
        initiator.set_blob_raw(b"Basic", b"a:b").unwrap();

        let messages = run(&mut initiator, &mut responder);
        let types: Vec<u8> = messages.iter().map(|m| m[4]).collect();
        assert_eq!(types, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn initiator_first_input_must_be_empty() {
        let mut initiator = Context::new(Role::Initiator);
        assert_eq!(
            initiator.input(&[1, 2, 3]),
            Status::Error(Error::UnexpectedInput)
        );
        assert_eq!(initiator.state(), State::Failed);
    }

    #[test]
    fn responder_rejects_empty_input() {
        let mut responder = Context::new(Role::Responder);
        assert_eq!(responder.input(&[]), Status::Error(Error::ParseIncomplete));
    }

    #[test]
    fn out_of_order_message() {
        let (mut initiator, mut responder) = pair();
        initiator.input(&[]);
        let initiate = initiator.output().unwrap();

        // An initiator does not accept its own kind of message.
        let mut other = Context::new(Role::Initiator);
        assert_eq!(other.input(&[]), Status::Continue);
        assert_eq!(
            initiator.input(&other.output().unwrap()),
            Status::Error(Error::UnexpectedMessage(
                MessageType::Offer,
                MessageType::Initiate
            ))
        );

        responder.input(&initiate);
        assert!(responder.output().is_some());
    }

    #[test]
    fn failure_is_sticky() {
        let mut responder = Context::new(Role::Responder);
        let first = responder.input(&[0xFF; 12]);
        assert!(first.is_error());

        let mut initiator = Context::new(Role::Initiator);
        initiator.input(&[]);
        let initiate = initiator.output().unwrap();

        // A valid message does not revive a failed context.
        assert_eq!(responder.input(&initiate), first);
        assert_eq!(responder.output(), None);
        if let Status::Error(error) = &first {
            assert_eq!(responder.failure(), Some(error));
        }
    }

    #[test]
    fn input_after_complete() {
        let (mut initiator, mut responder) = pair();
        initiator.set_blob_raw(b"Basic", b"a:b").unwrap();
        run(&mut initiator, &mut responder);

        assert_eq!(initiator.input(&[]), Status::Error(Error::Finished));
        assert_eq!(initiator.state(), State::Complete);
        assert!(initiator.delegation_key().is_some());
        assert!(initiator.failure().is_none());

        let key = responder.delegation_key().unwrap().to_vec();
        assert_eq!(responder.input(b"garbage"), Status::Error(Error::Finished));
        assert_eq!(responder.state(), State::Complete);
        assert_eq!(responder.delegation_key(), Some(&key[..]));
        assert_eq!(responder.blob_data(), Some(&b"a:b"[..]));
    }

    #[test]
    fn set_blob_rules() {
        let mut responder = Context::new(Role::Responder);
        assert_eq!(
            responder.set_blob_raw(b"Basic", b"a:b"),
            Err(Error::NotInitiator)
        );

        let (mut initiator, mut responder) = pair();
        initiator.set_blob_raw(b"Basic", b"a:b").unwrap();
        run(&mut initiator, &mut responder);
        assert_eq!(
            initiator.set_blob_raw(b"Basic", b"c:d"),
            Err(Error::BlobAlreadySent)
        );
    }

    #[test]
    fn cert_data_locked_after_first_round() {
        let mut initiator = Context::new(Role::Initiator);
        initiator.set_cert_data(b"cert").unwrap();
        initiator.input(&[]);
        assert_eq!(initiator.set_cert_data(b"cert"), Err(Error::CertDataLocked));
    }

    #[test]
    fn missing_blob_fails_initiator() {
        let (mut initiator, mut responder) = pair();

        initiator.input(&[]);
        responder.input(&initiator.output().unwrap());
        initiator.input(&responder.output().unwrap());
        responder.input(&initiator.output().unwrap());

        assert_eq!(
            initiator.input(&responder.output().unwrap()),
            Status::Error(Error::MissingBlob)
        );
        assert_eq!(initiator.output(), None);
    }

    #[test]
    fn group_not_accepted() {
        let config = Config::builder()
            .accepted_groups([NamedGroup::X25519])
            .build()
            .unwrap();
        let mut responder = Context::with_config(Role::Responder, Arc::new(config));

        let config = Config::builder()
            .key_exchange(NamedGroup::Modp2048)
            .build()
            .unwrap();
        let mut initiator = Context::with_config(Role::Initiator, Arc::new(config));

        initiator.input(&[]);
        assert_eq!(
            responder.input(&initiator.output().unwrap()),
            Status::Error(Error::UnsupportedGroup(NamedGroup::Modp2048))
        );
    }
}
