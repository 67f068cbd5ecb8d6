use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeysmithError {
    #[error("Invalid length {length}: must be between {min} and {max}")]
    InvalidLength { length: i64, min: usize, max: usize },
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(#[from] ClipboardError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Failed to open clipboard: {0}")]
    Init(String),
    #[error("Failed to read clipboard: {0}")]
    Read(String),
    #[error("Failed to write clipboard: {0}")]
    Write(String),
    #[error("Clipboard access denied")]
    Denied,
}
