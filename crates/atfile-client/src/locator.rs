//! Blob URL derivation
//!
//! The canonical ATFile host serves blobs as static assets under
//! `/blob/<did>/<cid>`. Every other PDS goes through the federation sync
//! endpoint. Which servers count as canonical is decided by a [`HostPolicy`]
//! using plain string equality on the configured server URL: no DNS lookups,
//! no redirects, no alias resolution. A mirror reachable under another name
//! or scheme is therefore treated as a generic PDS.

/// The canonical ATFile hosting endpoint
pub const DEFAULT_CANONICAL_HOST: &str = "https://zio.blue";

/// Decides whether a server URL is a canonical blob host
pub trait HostPolicy: Send + Sync {
    fn is_canonical(&self, server: &str) -> bool;
}

/// A fixed list of canonical host URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHosts {
    hosts: Vec<String>,
}

impl CanonicalHosts {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for CanonicalHosts {
    fn default() -> Self {
        Self::new([DEFAULT_CANONICAL_HOST])
    }
}

impl HostPolicy for CanonicalHosts {
    fn is_canonical(&self, server: &str) -> bool {
        self.hosts.iter().any(|host| host == server)
    }
}

/// Derives the download URL of a blob
pub struct BlobLocator {
    policy: Box<dyn HostPolicy>,
}

impl BlobLocator {
    pub fn new(policy: impl HostPolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }

    /// Build the blob URL for `(server, did, cid)`
    pub fn locate(&self, server: &str, did: &str, cid: &str) -> String {
        if self.policy.is_canonical(server) {
            format!("{}/blob/{}/{}", server, did, cid)
        } else {
            format!(
                "{}/xrpc/com.atproto.sync.getBlob?did={}&cid={}",
                server, did, cid
            )
        }
    }
}

impl Default for BlobLocator {
    fn default() -> Self {
        Self::new(CanonicalHosts::default())
    }
}
