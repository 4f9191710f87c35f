//! SL client error types.

/// Errors from a single departures fetch.
///
/// All variants are terminal for the attempt: nothing inside the client
/// retries. Callers record the failure and try again on their next cycle.
#[derive(Debug, thiserror::Error)]
pub enum SlError {
    /// The request could not be built (bad site id or base URL).
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Connection failure, timeout, or a non-2xx status.
    #[error("{}", transport_message(*status, message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The response body did not match the expected schema.
    #[error("failed to decode departures: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },
}

fn transport_message(status: Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("upstream returned HTTP {status}: {message}"),
        None => format!("network error: {message}"),
    }
}

impl SlError {
    /// Short text suitable for showing to a rider.
    pub fn user_message(&self) -> &'static str {
        match self {
            SlError::InvalidRequest { .. } => "Invalid request",
            SlError::Transport { .. } => "Network connection failed",
            SlError::Decode { .. } => "Failed to process server response",
        }
    }
}

impl From<reqwest::Error> for SlError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SlError::Decode {
                message: err.to_string(),
                body: None,
            }
        } else if err.is_builder() {
            SlError::InvalidRequest {
                message: err.to_string(),
            }
        } else {
            SlError::Transport {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SlError::InvalidRequest {
            message: "bad site id".into(),
        };
        assert_eq!(err.to_string(), "invalid request: bad site id");

        let err = SlError::Transport {
            status: Some(503),
            message: "Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "upstream returned HTTP 503: Service Unavailable"
        );

        let err = SlError::Transport {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = SlError::Decode {
            message: "missing field `departures`".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("failed to decode"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn user_messages() {
        let err = SlError::Transport {
            status: Some(500),
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Network connection failed");

        let err = SlError::Decode {
            message: String::new(),
            body: None,
        };
        assert_eq!(err.user_message(), "Failed to process server response");
    }
}
