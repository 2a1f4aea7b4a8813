//! HTTP client running the session → record → blob pipeline

use crate::error::{ClientError, Failure, Result};
use crate::fetch::BlobContent;
use crate::locator::BlobLocator;
use crate::record::{get_record_url, UploadRecord};
use crate::session::{Credentials, Session};
use crate::types::{
    CreateSessionRequest, CreateSessionResponse, GetRecordResponse, XrpcErrorResponse,
};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything one run produces before content probing
#[derive(Debug)]
pub struct FetchedUpload {
    pub session: Session,
    pub record: UploadRecord,
    pub blob_url: String,
    pub content: BlobContent,
}

/// Client for fetching ATFile uploads from a single PDS
pub struct AtFileClient {
    client: Client,
    credentials: Credentials,
    locator: BlobLocator,
}

impl AtFileClient {
    /// Create a client with the default locator and timeout
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_options(credentials, BlobLocator::default(), DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        credentials: Credentials,
        locator: BlobLocator,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::HttpClient(Box::new(e)))?;

        Ok(Self {
            client,
            credentials,
            locator,
        })
    }

    /// Exchange username and password for a bearer session
    pub async fn create_session(&self) -> Result<Session> {
        let url = format!(
            "{}/xrpc/com.atproto.server.createSession",
            self.credentials.server
        );
        debug!(url = %url, identifier = %self.credentials.username, "Creating session");

        let body = CreateSessionRequest {
            identifier: &self.credentials.username,
            password: &self.credentials.password,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Authentication(Failure::from(e)))?;

        if !response.status().is_success() {
            let failure = status_failure(response).await;
            warn!(error = %failure, "createSession rejected");
            return Err(ClientError::Authentication(failure));
        }

        let data: CreateSessionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Authentication(Failure::from(e)))?;

        let session = Session::from_response(data)?;
        info!(did = ?session.did, handle = ?session.handle, "Authenticated");
        Ok(session)
    }

    /// Look up an upload record in the user's repository
    pub async fn get_upload_record(&self, session: &Session, rkey: &str) -> Result<UploadRecord> {
        let url = get_record_url(&self.credentials.server, &self.credentials.username, rkey);
        debug!(url = %url, "Fetching upload record");

        let response = self
            .client
            .get(&url)
            .bearer_auth(session.access_token())
            .send()
            .await
            .map_err(|e| ClientError::Resolution(Failure::from(e)))?;

        if !response.status().is_success() {
            let failure = status_failure(response).await;
            warn!(rkey, error = %failure, "getRecord rejected");
            return Err(match failure {
                Failure::Status { status: 400, ref body } if body.starts_with("RecordNotFound") => {
                    ClientError::RecordNotFound {
                        repo: self.credentials.username.clone(),
                        rkey: rkey.to_string(),
                    }
                }
                other => ClientError::Resolution(other),
            });
        }

        let data: GetRecordResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Resolution(Failure::from(e)))?;

        let record = UploadRecord::from_response(data)?;
        debug!(
            uri = %record.uri,
            cid = %record.blob.cid,
            "Resolved upload record"
        );
        Ok(record)
    }

    /// Download URL for the record's blob
    pub fn blob_url(&self, record: &UploadRecord) -> String {
        self.locator
            .locate(&self.credentials.server, record.did(), &record.blob.cid)
    }

    /// Download a blob into memory
    pub async fn fetch_blob(&self, session: &Session, url: &str) -> Result<BlobContent> {
        debug!(url = %url, "Fetching blob");

        let response = self
            .client
            .get(url)
            .bearer_auth(session.access_token())
            .send()
            .await
            .map_err(|e| ClientError::Fetch(Failure::from(e)))?;

        if !response.status().is_success() {
            let failure = status_failure(response).await;
            warn!(url = %url, error = %failure, "Failed to fetch blob");
            return Err(ClientError::Fetch(failure));
        }

        let content = BlobContent::read(response).await?;
        debug!(
            size = content.len(),
            content_type = ?content.content_type,
            "Fetched blob"
        );
        Ok(content)
    }

    /// Run the whole pipeline for one record key
    pub async fn fetch_upload(&self, rkey: &str) -> Result<FetchedUpload> {
        let session = self.create_session().await?;
        let record = self.get_upload_record(&session, rkey).await?;
        let blob_url = self.blob_url(&record);
        let content = self.fetch_blob(&session, &blob_url).await?;

        Ok(FetchedUpload {
            session,
            record,
            blob_url,
            content,
        })
    }
}

/// Turn a non-success response into a [`Failure::Status`]
async fn status_failure(response: Response) -> Failure {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Failure::status(status, &XrpcErrorResponse::describe(&body))
}
