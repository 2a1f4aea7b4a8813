//! Error types for the ATFile client

use at_uri_parser::AtUriError;
use std::fmt;

/// Longest error body kept in a [`Failure::Status`]
const MAX_ERROR_BODY: usize = 200;

/// Pipeline stage an error is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Authentication,
    Resolution,
    Fetch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Setup => write!(f, "client setup"),
            Stage::Authentication => write!(f, "authentication"),
            Stage::Resolution => write!(f, "record resolution"),
            Stage::Fetch => write!(f, "blob fetch"),
        }
    }
}

/// What went wrong with a single XRPC round trip
#[derive(Debug)]
pub enum Failure {
    Http(Box<reqwest::Error>),
    Status { status: u16, body: String },
    Decode(String),
    MissingField(&'static str),
}

impl Failure {
    pub(crate) fn status(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_ERROR_BODY) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Failure::Status { status, body }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Http(err) => write!(f, "HTTP error: {}", err),
            Failure::Status { status, body } if body.is_empty() => {
                write!(f, "server returned status {}", status)
            }
            Failure::Status { status, body } => {
                write!(f, "server returned status {}: {}", status, body)
            }
            Failure::Decode(msg) => write!(f, "invalid response: {}", msg),
            Failure::MissingField(field) => write!(f, "response is missing `{}`", field),
        }
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Failure::Decode(err.to_string())
        } else {
            Failure::Http(Box::new(err))
        }
    }
}

#[derive(Debug)]
pub enum ClientError {
    HttpClient(Box<reqwest::Error>),
    Authentication(Failure),
    Resolution(Failure),
    RecordNotFound { repo: String, rkey: String },
    MalformedUri(AtUriError),
    /// The record exists but has no blob attached
    MissingBlob { uri: String },
    Fetch(Failure),
}

impl ClientError {
    pub fn stage(&self) -> Stage {
        match self {
            ClientError::HttpClient(_) => Stage::Setup,
            ClientError::Authentication(_) => Stage::Authentication,
            ClientError::Resolution(_)
            | ClientError::RecordNotFound { .. }
            | ClientError::MalformedUri(_)
            | ClientError::MissingBlob { .. } => Stage::Resolution,
            ClientError::Fetch(_) => Stage::Fetch,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: ", self.stage())?;
        match self {
            ClientError::HttpClient(err) => write!(f, "{}", err),
            ClientError::Authentication(failure)
            | ClientError::Resolution(failure)
            | ClientError::Fetch(failure) => write!(f, "{}", failure),
            ClientError::RecordNotFound { repo, rkey } => {
                write!(f, "record {} not found in repo {}", rkey, repo)
            }
            ClientError::MalformedUri(err) => write!(f, "malformed record URI: {}", err),
            ClientError::MissingBlob { uri } => {
                write!(f, "record {} has no attached blob", uri)
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::HttpClient(err) => Some(err.as_ref()),
            ClientError::Authentication(Failure::Http(err))
            | ClientError::Resolution(Failure::Http(err))
            | ClientError::Fetch(Failure::Http(err)) => Some(err.as_ref()),
            ClientError::MalformedUri(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AtUriError> for ClientError {
    fn from(err: AtUriError) -> Self {
        ClientError::MalformedUri(err)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_error_display() {
        let err = ClientError::Authentication(Failure::MissingField("accessJwt"));
        assert_eq!(
            format!("{}", err),
            "authentication failed: response is missing `accessJwt`"
        );
    }

    #[test]
    fn test_missing_blob_is_resolution_stage() {
        let err = ClientError::MissingBlob {
            uri: "at://did:plc:abc123/blue.zio.atfile.upload/k1".to_string(),
        };
        assert_eq!(err.stage(), Stage::Resolution);
        assert_eq!(
            format!("{}", err),
            concat!(
                "record resolution failed: ",
                "record at://did:plc:abc123/blue.zio.atfile.upload/k1 has no attached blob"
            )
        );
    }

    #[test]
    fn test_fetch_status_display() {
        let err = ClientError::Fetch(Failure::status(404, "Blob not found"));
        assert_eq!(
            format!("{}", err),
            "blob fetch failed: server returned status 404: Blob not found"
        );
    }

    #[test]
    fn test_status_body_truncated() {
        let body = "x".repeat(500);
        match Failure::status(500, &body) {
            Failure::Status { body, .. } => {
                assert_eq!(body.len(), MAX_ERROR_BODY + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_uri_has_source() {
        let err = ClientError::from(AtUriError::Shape("at://x".to_string()));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.stage(), Stage::Resolution);
    }

    #[test]
    fn test_error_is_debug() {
        let err = ClientError::RecordNotFound {
            repo: "alice.example".to_string(),
            rkey: "k1".to_string(),
        };
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("RecordNotFound"));
    }
}
