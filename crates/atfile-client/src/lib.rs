//! ATFile client
//!
//! Authenticates against an AT Protocol PDS, resolves a
//! `blue.zio.atfile.upload` record to its attached blob, derives the blob's
//! download URL and fetches the bytes. The stages run strictly in order and
//! each one either yields the next stage's input or fails the whole run.

pub mod client;
pub mod error;
pub mod fetch;
pub mod locator;
pub mod record;
pub mod session;
mod types;

pub use client::{AtFileClient, FetchedUpload, DEFAULT_TIMEOUT};
pub use error::{ClientError, Failure, Result, Stage};
pub use fetch::BlobContent;
pub use locator::{BlobLocator, CanonicalHosts, HostPolicy, DEFAULT_CANONICAL_HOST};
pub use record::{BlobRef, FileMetadata, UploadRecord, UPLOAD_COLLECTION};
pub use session::{Credentials, Session};
