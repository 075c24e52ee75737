//! Errors raised while talking to the hosted database

/// Error type for REST queries
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The data source was built without usable credentials
    #[error("Database is not configured: {reason}")]
    NotConfigured { reason: String },
    #[error("Database request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Database returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to decode rows from '{table}': {source}")]
    Decode {
        table: String,
        source: serde_json::Error,
    },
    #[error("Invalid response from database: {0}")]
    InvalidResponse(String),
}

impl DbError {
    /// Check if this error means the data source was never configured
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }

    /// Build a status error, preferring the JSON `message` field of the body
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        Self::Status { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_json_message() {
        let err = DbError::from_status(
            404,
            r#"{"code":"42P01","message":"relation \"public.nope\" does not exist"}"#,
        );
        match err {
            DbError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "relation \"public.nope\" does not exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_falls_back_to_body() {
        let err = DbError::from_status(502, " Bad Gateway \n");
        assert_eq!(err.to_string(), "Database returned HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_not_configured() {
        let err = DbError::NotConfigured {
            reason: "SUPABASE_URL is not set".to_string(),
        };
        assert!(err.is_not_configured());
        assert!(!DbError::InvalidResponse("x".to_string()).is_not_configured());
    }
}
