//! HTTP authentication for the document endpoint.
//!
//! The variables API is protected with HTTP Basic authentication. Credentials
//! come from the configuration or the command line and are sent with every
//! request as a default `Authorization` header.

pub mod basic;

use std::fmt;

/// Username and password for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The `Authorization` header value for these credentials.
    pub fn header_value(&self) -> String {
        basic::basic_auth(&self.username, &self.password)
    }
}

// Keeps passwords out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
