//! Error types for the fitrec domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all fitrec operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Search collaborator errors ---
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    // --- Vision collaborator errors ---
    #[error("Vision error: {0}")]
    Vision(#[from] VisionError),

    // --- Baseline collaborator errors ---
    #[error("Baseline error: {0}")]
    Baseline(#[from] BaselineError),

    // --- Profile construction errors ---
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised by a document-search backend. The retrieval strategies
/// catch these per query and degrade to an empty result set.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Search request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Search backend not configured: {0}")]
    NotConfigured(String),

    #[error("Search request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed search response: {0}")]
    InvalidResponse(String),
}

/// Errors raised by the vision-analysis collaborator. Callers map every
/// variant to "no visual insight" rather than failing the request.
#[derive(Debug, Clone, Error)]
pub enum VisionError {
    #[error("Vision analyzer not available")]
    Unavailable,

    #[error("Vision request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Vision request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed vision response: {0}")]
    InvalidResponse(String),
}

/// Errors raised by the baseline-recommendation collaborator.
#[derive(Debug, Clone, Error)]
pub enum BaselineError {
    #[error("Baseline generation failed: {0}")]
    Failed(String),
}

/// Errors raised while constructing a [`crate::UserProfile`] from raw
/// user data. These fail fast at the boundary — nothing deeper in the
/// loop guards against malformed demographics.
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("Invalid age '{0}': expected a whole number of years")]
    InvalidAge(String),

    #[error("Invalid weight '{0}': expected a positive number")]
    InvalidWeight(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_displays_correctly() {
        let err = Error::Search(SearchError::ApiError {
            status_code: 503,
            message: "Service unavailable".into(),
        });
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("Service unavailable"));
    }

    #[test]
    fn profile_error_displays_correctly() {
        let err = Error::Profile(ProfileError::InvalidAge("abc".into()));
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn vision_error_displays_correctly() {
        let err = Error::Vision(VisionError::Unavailable);
        assert!(err.to_string().contains("not available"));
    }
}
