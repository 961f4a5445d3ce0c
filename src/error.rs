use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;

/// Failures surfaced by the CSV import session.
///
/// Parse-time anomalies never show up here: blank lines, short rows and
/// missing columns are absorbed by defaulting.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("no file selected; choose a CSV file to import")]
    NoFileSelected,
    #[error("no document to submit; parse a CSV file first")]
    NoDocumentToSubmit,
    #[error("a submission is already in flight")]
    SubmitInFlight,
    #[error("failed to read {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to submit blog, please try again ({0})")]
    SubmitTransport(#[source] ApiError),
    #[error("blog submission timed out after {0:?}, please try again")]
    SubmitTimeout(Duration),
}

impl ImportError {
    /// Whether the same document can be resubmitted as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SubmitTransport(_) | Self::SubmitTimeout(_))
    }
}

impl From<ApiError> for ImportError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Timeout(after) => Self::SubmitTimeout(after),
            other => Self::SubmitTransport(other),
        }
    }
}

/// Failures from the REST backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("server responded {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_its_own_kind() {
        let err = ImportError::from(ApiError::Timeout(Duration::from_secs(3)));
        assert!(matches!(err, ImportError::SubmitTimeout(d) if d == Duration::from_secs(3)));
        assert!(err.is_retryable());
    }

    #[test]
    fn rejected_status_is_a_transport_failure() {
        let err = ImportError::from(ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        });
        assert!(matches!(err, ImportError::SubmitTransport(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn preconditions_are_not_retryable() {
        assert!(!ImportError::NoFileSelected.is_retryable());
        assert!(!ImportError::NoDocumentToSubmit.is_retryable());
        assert!(!ImportError::SubmitInFlight.is_retryable());
    }
}
