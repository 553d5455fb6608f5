use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed wire record: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode wire record: {0}")]
    Encode(#[source] serde_json::Error),
}
