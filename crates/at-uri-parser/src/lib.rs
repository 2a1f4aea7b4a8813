//! Parser for AT Protocol URIs
//!
//! Parses record URIs of the form `at://<did>/<collection>/<rkey>` into their
//! component parts. The authority segment is captured by name and must be a
//! DID; anything else is rejected instead of being indexed positionally.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Parsed components of an AT Protocol record URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtUri {
    pub did: String,
    pub collection: String,
    pub rkey: String,
}

/// Why a string is not a record URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtUriError {
    /// Missing the `at://` scheme marker
    MissingScheme(String),
    /// Not exactly `authority/collection/rkey` after the scheme
    Shape(String),
    /// Authority segment is not a `did:<method>:<id>` identifier
    NotADid(String),
}

impl fmt::Display for AtUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtUriError::MissingScheme(uri) => write!(f, "not an at:// URI: {uri:?}"),
            AtUriError::Shape(uri) => {
                write!(f, "expected at://<did>/<collection>/<rkey>, got {uri:?}")
            }
            AtUriError::NotADid(authority) => {
                write!(f, "URI authority is not a DID: {authority:?}")
            }
        }
    }
}

impl std::error::Error for AtUriError {}

static AT_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^at://(?P<authority>[^/]+)/(?P<collection>[^/]+)/(?P<rkey>[^/]+)$")
        .unwrap()
});

static DID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^did:[a-z]+:[A-Za-z0-9._:%-]+$").unwrap());

impl AtUri {
    /// Parse an AT Protocol URI like "at://did:plc:xxx/collection/rkey"
    pub fn parse(uri: &str) -> Result<Self, AtUriError> {
        if !uri.starts_with("at://") {
            return Err(AtUriError::MissingScheme(uri.to_string()));
        }

        let caps = AT_URI_RE
            .captures(uri)
            .ok_or_else(|| AtUriError::Shape(uri.to_string()))?;

        let authority = &caps["authority"];
        if !DID_RE.is_match(authority) {
            return Err(AtUriError::NotADid(authority.to_string()));
        }

        Ok(Self {
            did: authority.to_string(),
            collection: caps["collection"].to_string(),
            rkey: caps["rkey"].to_string(),
        })
    }
}

impl fmt::Display for AtUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at://{}/{}/{}", self.did, self.collection, self.rkey)
    }
}

impl std::str::FromStr for AtUri {
    type Err = AtUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
