use std::path::PathBuf;
use thiserror::Error;

/// Rejections raised while turning raw caller input into a probe request.
///
/// These are produced synchronously, before any socket is opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid IP address: {0}")]
    InvalidIp(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Failures while loading an instrument inventory file.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("could not read inventory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed inventory: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate device id '{0}' in inventory")]
    DuplicateId(String),
}
