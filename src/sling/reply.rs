//! Buffered HTTP response returned by session calls.

use crate::error::SlingError;

/// Status, content type and body of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub code: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpReply {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Turn a non-2xx reply into `SlingError::Status`.
    pub fn error_for_status(self) -> Result<Self, SlingError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SlingError::Status {
                code: self.code,
                body: self.body,
            })
        }
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, SlingError> {
        serde_json::from_str(&self.body)
            .map_err(|e| SlingError::InvalidResponse(format!("expected JSON body: {e}")))
    }
}
