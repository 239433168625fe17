// crates/citycompare-core/src/error.rs
use thiserror::Error;

/// Errors that abort a comparison or a preference round-trip.
///
/// Secondary provider failures never show up here: adapters turn them into
/// absent fields (see [`crate::providers`]). Only the primary geocode lookup
/// and the preference file can fail loudly.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The forward geocoder returned zero matches for the given input.
    #[error("City \"{0}\" not found. Please try a different search term.")]
    CityNotFound(String),

    /// The primary geocoder could not be reached or answered garbage.
    #[error("{provider} is unavailable: {reason}")]
    ProviderUnavailable {
        provider: &'static str,
        reason: String,
    },

    /// Blank or otherwise unusable user input, rejected before any request.
    #[error("{0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure inside a single provider adapter.
///
/// This never leaves an adapter except for the forward geocoder, where it is
/// wrapped into [`CompareError::ProviderUnavailable`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[cfg(feature = "http")]
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, CompareError>;
