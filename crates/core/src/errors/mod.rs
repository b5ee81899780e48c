//! Error types and Result alias for the cointrack client

use thiserror::Error;

/// Main error type for the cointrack client
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Session token expired")]
    TokenExpired,

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Crypto '{name}' is still held in at least one wallet")]
    CryptoInUse { name: String },

    /// The wallet write already landed when this is raised; there is no
    /// rollback, so the ledger is missing a record the wallet reflects.
    #[error("Wallet was updated but recording the transaction failed: {0}")]
    TransactionLogFailed(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
