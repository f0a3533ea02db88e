//! Error taxonomy for the converter core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConverterError {
    /// The rate request failed or the response body was malformed.
    #[error("request failed: {0}")]
    Network(String),

    /// The target currency is absent from the provider response.
    #[error("no rate available for {from} -> {to}")]
    RateUnavailable { from: String, to: String },

    /// The user input is rejected before any request is made.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Persisted JSON under the given key cannot be parsed.
    #[error("persisted data under '{0}' is corrupt")]
    CorruptState(String),

    /// The key-value backend failed to read or write.
    #[error("storage failure: {0}")]
    Storage(String),
}
