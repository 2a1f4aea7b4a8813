//! Rendering of fetch results

use atfile_client::FetchedUpload;
use mpeg_probe::{ProbeResult, PREVIEW_LEN};
use serde::Serialize;

/// Everything printed for one fetched upload
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub uri: String,
    pub blob_url: &'a str,
    pub file_name: Option<&'a str>,
    pub size: usize,
    pub content_type: Option<&'a str>,
    pub result: &'a ProbeResult,
}

impl<'a> Report<'a> {
    pub fn new(upload: &'a FetchedUpload, result: &'a ProbeResult) -> Self {
        Self {
            uri: upload.record.uri.to_string(),
            blob_url: &upload.blob_url,
            file_name: file_name(upload),
            size: upload.content.len(),
            content_type: upload.content.content_type.as_deref(),
            result,
        }
    }
}

/// The "File Information" block printed before probing
pub fn file_information(upload: &FetchedUpload) -> String {
    let mut out = String::from("File Information:\n");
    if let Some(name) = file_name(upload) {
        out.push_str(&format!("Name: {}\n", name));
    }
    out.push_str(&format!("Size: {} bytes\n", upload.content.len()));
    out.push_str(&format!(
        "Content-Type: {}\n",
        upload.content.content_type.as_deref().unwrap_or("(none)")
    ));
    out
}

fn file_name(upload: &FetchedUpload) -> Option<&str> {
    upload
        .record
        .file
        .as_ref()
        .and_then(|file| file.name.as_deref())
}

/// Human-readable probe outcome
pub fn probe_summary(result: &ProbeResult) -> String {
    match result {
        ProbeResult::NotAudio { preview } => format!(
            "\nNot an MP3 file. First {} bytes of content:\n\"{}\"\n",
            PREVIEW_LEN, preview
        ),
        ProbeResult::Audio {
            id3,
            frame_sync_offset,
        } => {
            let mut out = String::new();
            if id3.is_present() {
                out.push_str("ID3 tag found at the beginning of the file\n");
                match id3.size() {
                    Some(size) => out.push_str(&format!("ID3 tag size: {} bytes\n", size)),
                    None => out.push_str("ID3 tag header is truncated\n"),
                }
            } else {
                out.push_str("No ID3 tag found at the beginning of the file\n");
            }
            match frame_sync_offset {
                Some(offset) => {
                    out.push_str(&format!("Found MP3 frame sync at offset: {}\n", offset))
                }
                None => out.push_str("No MP3 frame sync found\n"),
            }
            out
        }
    }
}

pub fn to_json(report: &Report<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
