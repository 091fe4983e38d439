use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::EventIdentity;

/// Errors raised while indexing, synchronizing or persisting event collections.
///
/// The first three variants are invariant violations of the input data and stop
/// the run; the rest come from the storage layer or configuration.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The secondary collection contains the same event twice
    #[error("duplicate event identity {identity}: first at entry {first}, again at entry {duplicate}")]
    DuplicateIdentity {
        identity: EventIdentity,
        first: u64,
        duplicate: u64,
    },

    /// A primary event has no counterpart in the secondary collection
    #[error("event identity {0} not found in secondary collection")]
    IdentityNotFound(EventIdentity),

    /// The secondary entry read back does not carry the identity it was indexed under
    #[error("mismatch between primary event {primary} and secondary event {secondary}")]
    IdentityMismatch {
        primary: EventIdentity,
        secondary: EventIdentity,
    },

    #[error("entry {index} out of range (collection holds {count} entries)")]
    EntryOutOfRange { index: u64, count: u64 },

    #[error("record sink already closed")]
    SinkClosed,

    #[error("i/o error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },

    #[error("failed to encode {what}: {message}")]
    Encode { what: &'static str, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SyncError {
    /// True for the variants that signal corrupted or inconsistent input data.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            SyncError::DuplicateIdentity { .. }
                | SyncError::IdentityNotFound(_)
                | SyncError::IdentityMismatch { .. }
        )
    }
}
