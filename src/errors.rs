use thiserror::Error;

/// Fallback shown when an upload fails without any usable error text.
pub const UPLOAD_FAILED: &str = "Upload failed";

/// Failure of a single backend call. Both state machines absorb these into
/// observable state; callers never see them raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    // ── Connection ───────────────────────────────────────────────────────────
    #[error("{0}")]
    Network(String),

    // ── Backend-reported ─────────────────────────────────────────────────────
    #[error("Server error: {status}")]
    Status { status: u16, detail: Option<String> },

    // ── Malformed body ───────────────────────────────────────────────────────
    #[error("{0}")]
    Decode(String),
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        TransportError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        TransportError::Decode(message.into())
    }

    pub fn status(status: u16, detail: Option<String>) -> Self {
        TransportError::Status { status, detail }
    }

    /// Text surfaced after `Error: ` when an upload fails.
    pub fn upload_detail(&self) -> String {
        match self {
            TransportError::Status { detail: Some(detail), .. } => detail.clone(),
            TransportError::Status { detail: None, .. } => UPLOAD_FAILED.to_string(),
            TransportError::Network(msg) | TransportError::Decode(msg) if !msg.is_empty() => {
                msg.clone()
            }
            _ => UPLOAD_FAILED.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive whole number of seconds (got '{value}')")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("{name} cannot be empty")]
    EmptyBaseUrl { name: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_detail_prefers_backend_detail() {
        let err = TransportError::status(500, Some("corrupt pdf".to_string()));
        assert_eq!(err.upload_detail(), "corrupt pdf");
    }

    #[test]
    fn upload_detail_falls_back_for_bare_status() {
        assert_eq!(TransportError::status(502, None).upload_detail(), UPLOAD_FAILED);
    }

    #[test]
    fn upload_detail_uses_transport_text() {
        let err = TransportError::network("connection refused");
        assert_eq!(err.upload_detail(), "connection refused");
        assert_eq!(TransportError::network("").upload_detail(), UPLOAD_FAILED);
        assert_eq!(TransportError::decode("expected value").upload_detail(), "expected value");
    }
}
