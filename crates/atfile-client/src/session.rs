//! Credentials and the bearer session obtained from `createSession`

use crate::error::{ClientError, Failure, Result};
use crate::types::CreateSessionResponse;
use std::fmt;

/// Login details for one PDS, supplied once by the caller
#[derive(Clone)]
pub struct Credentials {
    pub server: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(server: &str, username: &str, password: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated session, held in memory for a single run
#[derive(Clone)]
pub struct Session {
    access_token: String,
    pub did: Option<String>,
    pub handle: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            did: None,
            handle: None,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub(crate) fn from_response(response: CreateSessionResponse) -> Result<Self> {
        let access_token = response
            .access_jwt
            .filter(|token| !token.is_empty())
            .ok_or(ClientError::Authentication(Failure::MissingField(
                "accessJwt",
            )))?;

        Ok(Self {
            access_token,
            did: response.did,
            handle: response.handle,
        })
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("did", &self.did)
            .field("handle", &self.handle)
            .finish()
    }
}
