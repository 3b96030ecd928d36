//! Handle based surface mirroring the native SRD bindings.
//!
//! Calls return plain integers and fill caller supplied buffers. Variable
//! sized results use the two-call convention: pass `None` (or a buffer that
//! is too small) to learn the size, then call again with a buffer of at
//! least that size. A result below 1 means there is nothing to return.
//!
//! A [`Handle`] that was never created, or that was destroyed, is invalid.
//! Every call on it returns [`SRD_STATUS_ERROR`] or 0 and does nothing.

use crate::context::{Context, Status};
use crate::types::Role;

/// More rounds are needed.
pub const SRD_STATUS_CONTINUE: i32 = 1;

/// Handshake complete, or operation succeeded.
pub const SRD_STATUS_SUCCESS: i32 = 0;

/// Operation failed.
pub const SRD_STATUS_ERROR: i32 = -1;

/// Owner of one optional [`Context`].
#[derive(Debug, Default)]
pub struct Handle {
    context: Option<Context>,
}

impl Handle {
    /// Create a handle for a new context. `is_server` selects the responder.
    pub fn create(is_server: bool) -> Handle {
        Handle {
            context: Some(Context::new(Role::from_is_server(is_server))),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.context.is_some()
    }

    /// Underlying context, if the handle is valid.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut Context> {
        self.context.as_mut()
    }

    /// Release the context. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.context.take().is_some() {
            debug!("Handle destroyed");
        }
    }

    pub fn set_blob(&mut self, name: &[u8], data: &[u8]) -> i32 {
        let Some(context) = &mut self.context else {
            return SRD_STATUS_ERROR;
        };

        match context.set_blob_raw(name, data) {
            Ok(()) => SRD_STATUS_SUCCESS,
            Err(e) => {
                debug!("set_blob failed: {}", e);
                SRD_STATUS_ERROR
            }
        }
    }

    pub fn set_cert_data(&mut self, data: &[u8]) -> i32 {
        let Some(context) = &mut self.context else {
            return SRD_STATUS_ERROR;
        };

        match context.set_cert_data(data) {
            Ok(()) => SRD_STATUS_SUCCESS,
            Err(e) => {
                debug!("set_cert_data failed: {}", e);
                SRD_STATUS_ERROR
            }
        }
    }

    /// Feed one peer message. Returns one of the `SRD_STATUS_*` codes.
    ///
    /// Input after the handshake completed returns [`SRD_STATUS_ERROR`]
    /// without failing the context. Its keys and blob stay available.
    pub fn input(&mut self, message: &[u8]) -> i32 {
        let Some(context) = &mut self.context else {
            return SRD_STATUS_ERROR;
        };

        match context.input(message) {
            Status::Continue => SRD_STATUS_CONTINUE,
            Status::Success => SRD_STATUS_SUCCESS,
            Status::Error(_) => SRD_STATUS_ERROR,
        }
    }

    /// Fetch the pending message.
    ///
    /// A size query leaves the message in place. Only a successful copy
    /// consumes it.
    pub fn output(&mut self, buffer: Option<&mut [u8]>) -> i32 {
        let Some(context) = &mut self.context else {
            return 0;
        };

        let copied = copy_out(context.pending_output(), buffer);
        if copied.consumed {
            let _ = context.output();
        }
        copied.size
    }

    /// Name of the blob received from the peer.
    pub fn get_blob_name(&self, buffer: Option<&mut [u8]>) -> i32 {
        let name = self.context.as_ref().and_then(|c| c.blob_name());
        copy_out(name.map(str::as_bytes), buffer).size
    }

    /// Data of the blob received from the peer.
    pub fn get_blob_data(&self, buffer: Option<&mut [u8]>) -> i32 {
        let data = self.context.as_ref().and_then(|c| c.blob_data());
        copy_out(data, buffer).size
    }

    pub fn get_delegation_key(&self, buffer: Option<&mut [u8]>) -> i32 {
        let key = self.context.as_ref().and_then(|c| c.delegation_key());
        copy_out(key, buffer).size
    }

    pub fn get_integrity_key(&self, buffer: Option<&mut [u8]>) -> i32 {
        let key = self.context.as_ref().and_then(|c| c.integrity_key());
        copy_out(key, buffer).size
    }
}

struct Copied {
    size: i32,
    consumed: bool,
}

fn copy_out(value: Option<&[u8]>, buffer: Option<&mut [u8]>) -> Copied {
    let Some(value) = value else {
        return Copied {
            size: 0,
            consumed: false,
        };
    };

    // Messages and blobs are bounded by u16 lengths.
    let size = value.len() as i32;

    match buffer {
        Some(buffer) if buffer.len() >= value.len() => {
            buffer[..value.len()].copy_from_slice(value);
            Copied {
                size,
                consumed: true,
            }
        }
        _ => Copied {
            size,
            consumed: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_handle() {
        let mut handle = Handle::default();
        assert!(!handle.is_valid());
        assert_eq!(handle.set_blob(b"Basic", b"a:b"), SRD_STATUS_ERROR);
        assert_eq!(handle.input(&[]), SRD_STATUS_ERROR);
        assert_eq!(handle.output(None), 0);
        assert_eq!(handle.get_blob_name(None), 0);
        assert_eq!(handle.get_delegation_key(None), 0);
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut handle = Handle::create(false);
        assert!(handle.is_valid());
        handle.destroy();
        handle.destroy();
        assert!(!handle.is_valid());
        assert_eq!(handle.input(&[]), SRD_STATUS_ERROR);
    }

    #[test]
    fn output_size_query_does_not_consume() {
        let mut handle = Handle::create(false);
        assert_eq!(handle.input(&[]), SRD_STATUS_CONTINUE);

        let size = handle.output(None);
        assert!(size > 0);

        // Too small a buffer is a size query too.
        let mut small = vec![0u8; size as usize - 1];
        assert_eq!(handle.output(Some(&mut small[..])), size);

        let mut buffer = vec![0u8; size as usize];
        assert_eq!(handle.output(Some(buffer.as_mut_slice())), size);
        assert_eq!(&buffer[..4], b"SRD\0");

        // Taken.
        assert_eq!(handle.output(None), 0);
    }

    #[test]
    fn keys_before_completion() {
        let handle = Handle::create(true);
        assert_eq!(handle.get_delegation_key(None), 0);
        assert_eq!(handle.get_integrity_key(None), 0);
        assert_eq!(handle.get_blob_data(None), 0);
    }
}
