//! ATFile upload records and their blob references

use crate::error::{ClientError, Failure, Result};
use crate::types::{BlobObject, FileObject, GetRecordResponse};
use at_uri_parser::AtUri;

/// Collection NSID for ATFile uploads
pub const UPLOAD_COLLECTION: &str = "blue.zio.atfile.upload";

/// Reference to the blob attached to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    pub cid: String,
    pub mime_type: Option<String>,
    pub size: Option<u64>,
}

/// File details recorded by the uploader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: Option<String>,
    pub mime_type: Option<String>,
    pub size: Option<u64>,
}

/// A resolved `blue.zio.atfile.upload` record
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub uri: AtUri,
    pub cid: Option<String>,
    pub blob: BlobRef,
    pub file: Option<FileMetadata>,
}

impl UploadRecord {
    /// DID of the repository holding the record
    pub fn did(&self) -> &str {
        &self.uri.did
    }

    pub(crate) fn from_response(response: GetRecordResponse) -> Result<Self> {
        let raw_uri = response
            .uri
            .ok_or(ClientError::Resolution(Failure::MissingField("uri")))?;
        let uri = AtUri::parse(&raw_uri)?;

        let value = response
            .value
            .ok_or(ClientError::Resolution(Failure::MissingField("value")))?;

        let blob = value
            .blob
            .and_then(BlobRef::from_object)
            .ok_or_else(|| ClientError::MissingBlob {
                uri: raw_uri.clone(),
            })?;

        Ok(Self {
            uri,
            cid: response.cid,
            blob,
            file: value.file.map(FileMetadata::from),
        })
    }
}

impl BlobRef {
    fn from_object(object: BlobObject) -> Option<Self> {
        let cid = object
            .reference
            .and_then(|r| r.link)
            .or(object.cid)
            .filter(|cid| !cid.is_empty())?;

        Some(Self {
            cid,
            mime_type: object.mime_type,
            size: object.size,
        })
    }
}

impl From<FileObject> for FileMetadata {
    fn from(file: FileObject) -> Self {
        Self {
            name: file.name,
            mime_type: file.mime_type,
            size: file.size,
        }
    }
}

/// URL of the `getRecord` call for an upload in `repo`
pub(crate) fn get_record_url(server: &str, repo: &str, rkey: &str) -> String {
    format!(
        "{}/xrpc/com.atproto.repo.getRecord?repo={}&collection={}&rkey={}",
        server,
        urlencoding::encode(repo),
        UPLOAD_COLLECTION,
        urlencoding::encode(rkey)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<UploadRecord> {
        let response: GetRecordResponse = serde_json::from_str(json).unwrap();
        UploadRecord::from_response(response)
    }

    #[test]
    fn test_record_extracts_did_and_cid() {
        let record = parse(
            r#"{
                "uri": "at://did:plc:abc123/blue.zio.atfile.upload/3kxyz",
                "cid": "bafyreirecord",
                "value": {
                    "blob": {
                        "ref": { "$link": "bafkreiblob" },
                        "mimeType": "audio/mpeg",
                        "size": 10
                    },
                    "file": { "name": "song.mp3" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(record.did(), "did:plc:abc123");
        assert_eq!(record.blob.cid, "bafkreiblob");
        assert_eq!(record.blob.mime_type.as_deref(), Some("audio/mpeg"));
        assert_eq!(record.cid.as_deref(), Some("bafyreirecord"));
        assert_eq!(
            record.file.and_then(|f| f.name).as_deref(),
            Some("song.mp3")
        );
    }

    #[test]
    fn test_legacy_blob_cid() {
        let record = parse(
            r#"{
                "uri": "at://did:plc:abc123/blue.zio.atfile.upload/3kxyz",
                "value": { "blob": { "cid": "bafkreilegacy", "mimeType": "text/plain" } }
            }"#,
        )
        .unwrap();
        assert_eq!(record.blob.cid, "bafkreilegacy");
    }

    #[test]
    fn test_missing_blob_is_distinct() {
        let err = parse(
            r#"{
                "uri": "at://did:plc:abc123/blue.zio.atfile.upload/3kxyz",
                "value": { "file": { "name": "orphan.txt" } }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::MissingBlob { .. }));
    }

    #[test]
    fn test_missing_link_is_missing_blob() {
        let err = parse(
            r#"{
                "uri": "at://did:plc:abc123/blue.zio.atfile.upload/3kxyz",
                "value": { "blob": { "ref": {} } }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::MissingBlob { .. }));
    }

    #[test]
    fn test_missing_uri() {
        let err = parse(r#"{ "value": { "blob": { "ref": { "$link": "bafk" } } } }"#).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Resolution(Failure::MissingField("uri"))
        ));
    }

    #[test]
    fn test_short_uri_is_malformed() {
        let err = parse(
            r#"{
                "uri": "at://did:plc:abc123",
                "value": { "blob": { "ref": { "$link": "bafk" } } }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::MalformedUri(_)));
    }

    #[test]
    fn test_get_record_url_encodes_query() {
        assert_eq!(
            get_record_url("https://bsky.social", "alice.example", "3k xyz"),
            concat!(
                "https://bsky.social/xrpc/com.atproto.repo.getRecord",
                "?repo=alice.example&collection=blue.zio.atfile.upload&rkey=3k%20xyz"
            )
        );
    }
}
