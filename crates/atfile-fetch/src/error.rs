//! Error types for the atfile-fetch CLI

use atfile_client::ClientError;
use mpeg_probe::ProbeError;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    Config(String),
    Client(ClientError),
    Probe(ProbeError),
    Output(Box<serde_json::Error>),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Config(msg) => write!(f, "Configuration error: {}", msg),
            FetchError::Client(err) => write!(f, "{}", err),
            FetchError::Probe(err) => write!(f, "content check failed: {}", err),
            FetchError::Output(err) => write!(f, "Output error: {}", err),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Client(err) => Some(err),
            FetchError::Probe(err) => Some(err),
            FetchError::Output(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        FetchError::Client(err)
    }
}

impl From<ProbeError> for FetchError {
    fn from(err: ProbeError) -> Self {
        FetchError::Probe(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Output(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for FetchError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        FetchError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
