//! User domain model

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A registered custody user, identified by the API key issued at
/// registration. Both fields are unique across all users and never
/// change once the record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub api_key: String,
    pub email: String,
}

impl User {
    pub fn new(api_key: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            email: email.into(),
        }
    }

    /// Validate user data
    ///
    /// Advisory only: repositories persist whatever they are given, callers
    /// that accept external input run this first.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.api_key.trim().is_empty() {
            return Err("api key cannot be empty");
        }
        if self.email.trim().is_empty() {
            return Err("email cannot be empty");
        }
        let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
        if !email_re.is_match(&self.email) {
            return Err("email is not a valid address");
        }
        Ok(())
    }
}
