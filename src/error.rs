use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurioError {
    /// Rejected locally before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a failure status.
    #[error("{detail}")]
    Client { status: u16, detail: String },

    /// The request never completed.
    #[error("Network error: could not reach the server")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl CurioError {
    pub fn is_network(&self) -> bool {
        matches!(self, CurioError::Network(_))
    }
}

impl From<CurioError> for String {
    fn from(err: CurioError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_displays_detail_verbatim() {
        let err = CurioError::Client {
            status: 400,
            detail: "Username already registered".to_string(),
        };
        assert_eq!(err.to_string(), "Username already registered");
    }

    #[test]
    fn test_network_error_hides_transport_reason() {
        let err = CurioError::Network("TypeError: Failed to fetch".to_string());
        assert!(err.is_network());
        assert!(!err.to_string().contains("TypeError"));
    }
}
