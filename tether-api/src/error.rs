//! Error types for platform API calls

use thiserror::Error;

/// Errors surfaced by the dashboard and webhook directory clients
///
/// The provisioning reconciler treats [`ApiError::Network`] and
/// [`ApiError::Remote`] identically: both abort the current provisioning
/// call. The distinction exists for operator-facing messages and logs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: timeout, connection refused, TLS.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success response from the remote service.
    #[error("remote error ({status}): {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for callers that inspect challenges.
        body: String,
    },

    /// Response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Client construction failed because the base URL is unparsable.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Session-scoped call issued before authentication.
    #[error("not authenticated: call authenticate() first")]
    Unauthenticated,
}

impl ApiError {
    /// Get the HTTP status code if this is a remote error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a 401 carrying a two-factor challenge.
    ///
    /// The dashboard rejects password-only logins for two-factor-enabled
    /// accounts with a 401 whose body sets `"twofactor": true`.
    pub fn is_two_factor_challenge(&self) -> bool {
        match self {
            Self::Remote { status: 401, body } => {
                serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("twofactor").and_then(|t| t.as_bool()))
                    .unwrap_or(false)
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_only_for_remote() {
        let remote = ApiError::Remote {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(remote.status_code(), Some(403));
        assert_eq!(ApiError::Network("timeout".into()).status_code(), None);
    }

    #[test]
    fn two_factor_challenge_detection() {
        let challenge = ApiError::Remote {
            status: 401,
            body: r#"{"twofactor": true}"#.into(),
        };
        assert!(challenge.is_two_factor_challenge());

        let plain_401 = ApiError::Remote {
            status: 401,
            body: r#"{"error": "invalid credentials"}"#.into(),
        };
        assert!(!plain_401.is_two_factor_challenge());

        let wrong_status = ApiError::Remote {
            status: 403,
            body: r#"{"twofactor": true}"#.into(),
        };
        assert!(!wrong_status.is_two_factor_challenge());

        let non_json = ApiError::Remote {
            status: 401,
            body: "unauthorized".into(),
        };
        assert!(!non_json.is_two_factor_challenge());
    }
}
