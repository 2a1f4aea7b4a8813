//! Run configuration
//!
//! Every value resolves from the command line first, then from the
//! environment, then from a built-in default. The result is immutable and
//! passed by reference for the rest of the run.

use crate::cli::Cli;
use crate::error::{FetchError, Result};
use atfile_client::{BlobLocator, CanonicalHosts, Credentials, DEFAULT_CANONICAL_HOST};
use std::fmt;
use std::time::Duration;

const DEFAULT_SERVER: &str = "https://bsky.social";
const DEFAULT_USERNAME: &str = "handle";
const DEFAULT_PASSWORD: &str = "app-password";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone)]
pub struct FetchConfig {
    pub server: String,
    pub username: String,
    pub password: String,
    pub key: String,
    pub timeout: Duration,
    pub canonical_hosts: Vec<String>,
    pub strict: bool,
    pub output: OutputFormat,
}

impl FetchConfig {
    /// Resolve against the process environment
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    /// Resolve with `env` standing in for the process environment
    pub fn resolve<F>(cli: Cli, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |flag: Option<String>, var: &str, default: &str| {
            flag.or_else(|| env(var).filter(|v| !v.is_empty()))
                .unwrap_or_else(|| default.to_string())
        };

        let server = lookup(cli.server, "ATFILE_SERVER", DEFAULT_SERVER)
            .trim_end_matches('/')
            .to_string();
        if server.is_empty() {
            return Err(FetchError::Config("server URL is empty".to_string()));
        }

        let username = lookup(cli.username, "ATFILE_USERNAME", DEFAULT_USERNAME);
        let password = lookup(cli.password, "ATFILE_PASSWORD", DEFAULT_PASSWORD);

        let timeout_secs = match cli.timeout {
            Some(secs) => secs,
            None => match env("ATFILE_TIMEOUT_SECS") {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    FetchError::Config(format!(
                        "ATFILE_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                        raw
                    ))
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(FetchError::Config(
                "timeout must be at least one second".to_string(),
            ));
        }

        let canonical_hosts = env("ATFILE_CANONICAL_HOSTS")
            .map(|s| {
                s.split(',')
                    .map(|h| h.trim().trim_end_matches('/').to_string())
                    .filter(|h| !h.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_CANONICAL_HOST.to_string()]);

        let output = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Ok(Self {
            server,
            username,
            password,
            key: cli.key,
            timeout: Duration::from_secs(timeout_secs),
            canonical_hosts,
            strict: cli.strict,
            output,
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.server, &self.username, &self.password)
    }

    pub fn locator(&self) -> BlobLocator {
        BlobLocator::new(CanonicalHosts::new(self.canonical_hosts.iter().cloned()))
    }
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("key", &self.key)
            .field("timeout", &self.timeout)
            .field("canonical_hosts", &self.canonical_hosts)
            .field("strict", &self.strict)
            .field("output", &self.output)
            .finish()
    }
}
