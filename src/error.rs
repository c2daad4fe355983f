use thiserror::Error;

/// Unified error type for the manseryeok client.
///
/// Only two variants ever reach callers of [`crate::ManseryeokClient`]:
/// [`Error::NotFound`] from `get()` and [`Error::Configuration`] from
/// `update_config()`. The remaining variants belong to the collaborator
/// traits (remote fetcher, local dataset provider) and are recovered inside
/// the tier-resolution loop.
#[derive(Debug, Error)]
pub enum Error {
    /// No tier could resolve the key. Carries the canonical key form.
    #[error("no calendar record for {key}")]
    NotFound { key: String },

    /// A configuration patch contained an invalid value. Raised synchronously
    /// by `update_config()` before any state is touched.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The remote tier did not produce a usable record.
    #[error("remote lookup unavailable: {reason}")]
    RemoteUnavailable { reason: String },

    /// The remote call exceeded the configured deadline.
    #[error("remote lookup timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The remote response arrived but did not match the expected envelope.
    #[error("malformed remote response: {reason}")]
    MalformedResponse { reason: String },

    /// The fallback dataset could not be loaded.
    #[error("local dataset load failed: {reason}")]
    DatasetLoad { reason: String },

    /// A raw record failed normalization (out-of-range date fields, empty
    /// ganji, and similar shape problems).
    #[error("invalid calendar record for {key}: {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    pub fn remote_unavailable(reason: impl Into<String>) -> Self {
        Error::RemoteUnavailable {
            reason: reason.into(),
        }
    }

    pub fn dataset_load(reason: impl Into<String>) -> Self {
        Error::DatasetLoad {
            reason: reason.into(),
        }
    }

    /// True for the variants `get()` treats as a tier failure rather than a
    /// caller-visible outcome.
    pub fn is_tier_failure(&self) -> bool {
        !matches!(self, Error::NotFound { .. } | Error::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
