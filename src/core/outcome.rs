use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Failures raised before a response status is available.
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("invalid activation url: {0}")]
    InvalidUrl(String),
    /// `.` and `..` are dot-segments that URL normalization removes, so no
    /// request URL can carry them as the token.
    #[error("activation token cannot be sent as a url path segment")]
    UnroutableToken,
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("request aborted: {0}")]
    Aborted(String),
}

impl From<reqwest::Error> for ActivationError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL embeds the token; keep it out of messages and logs.
        ActivationError::Request(err.without_url())
    }
}

/// Result of one activation round-trip.
#[derive(Debug)]
pub enum ActivationOutcome {
    /// The backend answered with a 2xx status.
    Activated,
    /// The backend answered with any other status.
    Rejected(StatusCode),
    /// No status was received.
    TransportError(ActivationError),
}

impl ActivationOutcome {
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            ActivationOutcome::Activated
        } else {
            ActivationOutcome::Rejected(status)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActivationOutcome::Activated)
    }

    pub fn report(&self) -> OutcomeReport {
        match self {
            ActivationOutcome::Activated => OutcomeReport {
                outcome: "activated",
                status: None,
                error: None,
            },
            ActivationOutcome::Rejected(status) => OutcomeReport {
                outcome: "rejected",
                status: Some(status.as_u16()),
                error: None,
            },
            ActivationOutcome::TransportError(err) => OutcomeReport {
                outcome: "transport_error",
                status: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Machine-readable form of an outcome (`activator confirm --json`).
#[derive(Debug, Serialize)]
pub struct OutcomeReport {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OutcomeReport {
    /// No request was sent because the route had no token.
    pub fn missing_token() -> Self {
        OutcomeReport {
            outcome: "missing_token",
            status: None,
            error: None,
        }
    }
}
