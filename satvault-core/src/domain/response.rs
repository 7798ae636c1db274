//! Response envelopes returned by use-case services
//!
//! Business outcomes that are not faults (duplicate registration, for
//! example) travel as structured responses with an HTTP-style status
//! code, so a transport layer can forward them without interpreting
//! error types.

use serde::{Deserialize, Serialize};

/// Base outcome envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
}

impl Response {
    /// Create a successful response
    pub fn ok(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: true,
            message: message.into(),
            status_code,
        }
    }

    /// Create a failed response
    pub fn fail(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            status_code,
        }
    }
}

/// Registration outcome: the base envelope plus the issued API key.
/// The key is present exactly when registration succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    #[serde(flatten)]
    pub response: Response,
    pub api_key: Option<String>,
}

impl RegisterUserResponse {
    pub fn new(response: Response, api_key: Option<String>) -> Self {
        Self { response, api_key }
    }

    pub fn success(&self) -> bool {
        self.response.success
    }

    pub fn status_code(&self) -> u16 {
        self.response.status_code
    }
}
