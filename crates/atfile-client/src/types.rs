//! XRPC wire types for the endpoints the client talks to

use serde::{Deserialize, Serialize};

/// Body of `com.atproto.server.createSession`
#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub(crate) identifier: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSessionResponse {
    pub(crate) access_jwt: Option<String>,
    pub(crate) did: Option<String>,
    pub(crate) handle: Option<String>,
}

/// Response from `com.atproto.repo.getRecord`
#[derive(Debug, Deserialize)]
pub(crate) struct GetRecordResponse {
    pub(crate) uri: Option<String>,
    pub(crate) cid: Option<String>,
    pub(crate) value: Option<UploadRecordValue>,
}

/// The `blue.zio.atfile.upload` record body, reduced to what we read
#[derive(Debug, Deserialize)]
pub(crate) struct UploadRecordValue {
    pub(crate) blob: Option<BlobObject>,
    pub(crate) file: Option<FileObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BlobObject {
    #[serde(rename = "ref")]
    pub(crate) reference: Option<CidLink>,
    /// Legacy blob refs carry the CID as a plain string
    pub(crate) cid: Option<String>,
    pub(crate) mime_type: Option<String>,
    pub(crate) size: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CidLink {
    #[serde(rename = "$link")]
    pub(crate) link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileObject {
    pub(crate) name: Option<String>,
    pub(crate) mime_type: Option<String>,
    pub(crate) size: Option<u64>,
}

/// Error body returned by XRPC endpoints on non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct XrpcErrorResponse {
    pub(crate) error: Option<String>,
    pub(crate) message: Option<String>,
}

impl XrpcErrorResponse {
    /// Render as `Error: message`, falling back to the raw body
    pub(crate) fn describe(body: &str) -> String {
        match serde_json::from_str::<XrpcErrorResponse>(body) {
            Ok(XrpcErrorResponse {
                error: Some(error),
                message: Some(message),
            }) => format!("{}: {}", error, message),
            Ok(XrpcErrorResponse {
                error: Some(error), ..
            }) => error,
            _ => body.trim().to_string(),
        }
    }
}
