//! Store error types.

/// Errors from the shared key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Key contains characters that cannot name a storage slot
    #[error("invalid store key {0:?}")]
    InvalidKey(String),

    /// Reading or writing the underlying storage failed
    #[error("store I/O error for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored bytes are not the expected JSON shape
    #[error("stored value for key {key:?} is corrupt: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be serialized
    #[error("failed to encode value for key {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
