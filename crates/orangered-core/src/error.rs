//! Error taxonomy: creation-time errors are returned synchronously to the
//! caller; steady-state poll errors flow through a stream's error channel.

use thiserror::Error;

/// Failures surfaced by the listing client (the transport collaborator).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("http status {status}")]
    Http { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Failures of stream creation and steady-state polling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The configured name matched none of the candidate target kinds.
    #[error("target {name:?} matches no known kind")]
    UnknownTarget { name: String },

    /// Not a valid kind string (config/parse path, not remote resolution).
    #[error("unknown target kind: {0}")]
    UnknownKind(String),

    /// The remote existence check failed; surfaced, never retried here.
    #[error("target resolution failed: {0}")]
    Resolve(#[source] ClientError),

    /// The anchor fetch that seeds the cursor failed; no stream is started.
    #[error("anchor fetch failed: {0}")]
    Bootstrap(#[source] ClientError),

    /// A listing call failed during an iteration; the loop retries next
    /// interval.
    #[error("poll failed: {0}")]
    Poll(#[source] ClientError),

    /// A delivered inbox message could not be marked read; it will be listed
    /// (and delivered) again on the next iteration.
    #[error("failed to mark {id} as read: {source}")]
    MarkRead { id: String, source: ClientError },
}

impl StreamError {
    /// True for errors that abort stream creation (as opposed to errors
    /// reported from a running loop).
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnknownTarget { .. }
                | Self::UnknownKind(_)
                | Self::Resolve(_)
                | Self::Bootstrap(_)
        )
    }
}
