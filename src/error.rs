use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A response label outside the four study buttons.
    #[error("unknown response label: {0:?}")]
    UnknownResponse(String),

    /// A progress snapshot that could not be serialized or parsed.
    #[error("invalid progress snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
