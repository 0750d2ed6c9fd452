//! Error types for the receiver.

use thiserror::Error;

/// Validation failures raised when an account is constructed. These surface
/// before the receiver starts; a bad account never reaches the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    #[error("Account id is not a hex string: {0}")]
    InvalidAccountFormat(String),
    #[error("Account id must be 3-16 characters, got {0}")]
    InvalidAccountLength(usize),
    #[error("Encryption key is not a hex string")]
    InvalidKeyFormat,
    #[error("Encryption key must be 16, 24 or 32 characters, got {0}")]
    InvalidKeyLength(usize),
}

/// Per-frame failures. These are recovered inside the pipeline (counted and
/// answered with a NAK) and never reach the listener.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    #[error("Line is not a SIA DC-09, ADM-CID or OH frame: {0}")]
    Format(String),
    #[error("Encrypted frame without a matching account: {0}")]
    NoAccount(String),
}

/// Failures that stop the daemon before it serves anything: configuration,
/// account validation, sockets.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Missing config file: {0}")]
    MissingConfigFile(String),
    #[error("Config file parsing error: {0}")]
    ConfigFileParsingError(#[from] toml::de::Error),
    #[error("Account configuration error: {0}")]
    AccountError(#[from] AccountError),
    #[error("Socket error: {0}")]
    SocketError(#[from] std::io::Error),
}
