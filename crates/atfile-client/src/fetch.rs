//! Downloaded blob content

use crate::error::{ClientError, Failure, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;

/// Raw blob bytes together with the declared content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobContent {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl BlobContent {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read a successful blob response into memory
    pub(crate) async fn read(response: Response) -> Result<Self> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Fetch(Failure::from(e)))?
            .to_vec();

        Ok(Self {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_matches_bytes() {
        let content = BlobContent {
            bytes: b"hello".to_vec(),
            content_type: Some("text/plain".to_string()),
        };
        assert_eq!(content.len(), 5);
        assert!(!content.is_empty());
    }
}
