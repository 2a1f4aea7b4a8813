//! Content-type driven classification

use crate::error::{ProbeError, Result};
use crate::frame::find_frame_sync;
use crate::id3::{detect_id3, Id3Detection};
use serde::{Serialize, Serializer};
use std::fmt::{self, Write};
use tracing::debug;

/// Media type that triggers MPEG inspection
pub const MPEG_CONTENT_TYPE: &str = "audio/mpeg";

/// Bytes kept in a non-audio preview
pub const PREVIEW_LEN: usize = 100;

/// Leading bytes of non-audio content.
///
/// Displayed as the body of a double-quoted byte string: printable ASCII as
/// is, the usual C escapes plus `\e` for ESC, `\#` ahead of `{`, `$` or `@`,
/// and `\xHH` in upper-case hex for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview(Vec<u8>);

impl Preview {
    pub fn of(content: &[u8]) -> Self {
        Self(content[..content.len().min(PREVIEW_LEN)].to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &byte) in self.0.iter().enumerate() {
            match byte {
                b'"' => f.write_str("\\\"")?,
                b'\\' => f.write_str("\\\\")?,
                b'#' if matches!(self.0.get(i + 1), Some(b'{' | b'$' | b'@')) => {
                    f.write_str("\\#")?
                }
                b'\n' => f.write_str("\\n")?,
                b'\t' => f.write_str("\\t")?,
                b'\r' => f.write_str("\\r")?,
                0x07 => f.write_str("\\a")?,
                0x08 => f.write_str("\\b")?,
                0x0B => f.write_str("\\v")?,
                0x0C => f.write_str("\\f")?,
                0x1B => f.write_str("\\e")?,
                0x20..=0x7E => f.write_char(char::from(byte))?,
                _ => write!(f, "\\x{:02X}", byte)?,
            }
        }
        Ok(())
    }
}

impl Serialize for Preview {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What the prober found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeResult {
    NotAudio {
        preview: Preview,
    },
    Audio {
        id3: Id3Detection,
        frame_sync_offset: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Reject MPEG content that has neither an ID3 tag nor a frame sync
    pub strict: bool,
}

/// Classify `content` by its declared content type. Always completes.
pub fn probe(content: &[u8], content_type: Option<&str>) -> ProbeResult {
    if content_type != Some(MPEG_CONTENT_TYPE) {
        debug!(content_type = ?content_type, len = content.len(), "Not MPEG audio");
        return ProbeResult::NotAudio {
            preview: Preview::of(content),
        };
    }

    let id3 = detect_id3(content);
    let frame_sync_offset = find_frame_sync(content);
    debug!(id3 = ?id3, frame_sync_offset = ?frame_sync_offset, "Probed MPEG audio");

    ProbeResult::Audio {
        id3,
        frame_sync_offset,
    }
}

/// Like [`probe`], with optional strict validation of MPEG content
pub fn probe_with(
    content: &[u8],
    content_type: Option<&str>,
    options: ProbeOptions,
) -> Result<ProbeResult> {
    let result = probe(content, content_type);

    if options.strict {
        if let ProbeResult::Audio {
            id3: Id3Detection::NotFound,
            frame_sync_offset: None,
        } = result
        {
            return Err(ProbeError::Format(format!(
                "{} content of {} bytes has no ID3 tag and no MPEG frame sync",
                MPEG_CONTENT_TYPE,
                content.len()
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3::Id3Header;

    #[test]
    fn test_plain_text_preview() {
        let result = probe(b"hello", Some("text/plain"));
        match result {
            ProbeResult::NotAudio { preview } => {
                assert_eq!(preview.as_bytes(), b"hello");
                assert_eq!(preview.to_string(), "hello");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_preview_is_bounded() {
        let content = vec![b'a'; 250];
        let ProbeResult::NotAudio { preview } = probe(&content, Some("application/octet-stream"))
        else {
            panic!("expected NotAudio");
        };
        assert_eq!(preview.as_bytes().len(), PREVIEW_LEN);
    }

    #[test]
    fn test_preview_escapes_binary() {
        let preview = Preview::of(&[b'O', b'K', 0x00, 0xFF, b'\n', b'"', b'\\']);
        assert_eq!(preview.to_string(), r#"OK\x00\xFF\n\"\\"#);
    }

    #[test]
    fn test_preview_escape_table() {
        let preview = Preview::of(b"it's\x1b\x07\x08\t\r\x0b\x0c\x7f\xe2\x82\xac");
        assert_eq!(
            preview.to_string(),
            r#"it's\e\a\b\t\r\v\f\x7F\xE2\x82\xAC"#
        );
    }

    #[test]
    fn test_preview_escapes_interpolation_marker() {
        assert_eq!(Preview::of(b"#{x} #$y #@z #").to_string(), r#"\#{x} \#$y \#@z #"#);
    }

    #[test]
    fn test_missing_content_type_is_not_audio() {
        assert!(matches!(probe(b"ID3", None), ProbeResult::NotAudio { .. }));
    }

    #[test]
    fn test_content_type_match_is_exact() {
        for content_type in ["audio/mpeg; charset=binary", "AUDIO/MPEG", "audio/mp3"] {
            assert!(matches!(
                probe(b"\xFF\xFB", Some(content_type)),
                ProbeResult::NotAudio { .. }
            ));
        }
    }

    #[test]
    fn test_mp3_with_id3_and_sync() {
        let mut content = b"ID3\x03\x00\x00\x00\x00\x02\x01".to_vec();
        content.extend_from_slice(&[0x00; 257]);
        content.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);

        assert_eq!(
            probe(&content, Some(MPEG_CONTENT_TYPE)),
            ProbeResult::Audio {
                id3: Id3Detection::Found(Id3Header {
                    major_version: 3,
                    revision: 0,
                    flags: 0,
                    size: 257,
                }),
                frame_sync_offset: Some(267),
            }
        );
    }

    #[test]
    fn test_mp3_without_anything_still_completes() {
        assert_eq!(
            probe(b"\x00\x01\x02", Some(MPEG_CONTENT_TYPE)),
            ProbeResult::Audio {
                id3: Id3Detection::NotFound,
                frame_sync_offset: None,
            }
        );
    }

    #[test]
    fn test_strict_rejects_unrecognizable_mpeg() {
        let options = ProbeOptions { strict: true };
        let err = probe_with(b"\x00\x01\x02", Some(MPEG_CONTENT_TYPE), options).unwrap_err();
        assert!(matches!(err, ProbeError::Format(_)));

        assert!(probe_with(b"\xFF\xFB", Some(MPEG_CONTENT_TYPE), options).is_ok());
        assert!(probe_with(b"plain", Some("text/plain"), options).is_ok());
    }

    #[test]
    fn test_lenient_accepts_unrecognizable_mpeg() {
        assert!(probe_with(b"\x00", Some(MPEG_CONTENT_TYPE), ProbeOptions::default()).is_ok());
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_value(probe(b"hi\x00", Some("text/plain"))).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "not_audio", "preview": "hi\\x00"}));

        let json = serde_json::to_value(probe(b"\x00\xFF\xE1", Some(MPEG_CONTENT_TYPE))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "audio",
                "id3": {"status": "not_found"},
                "frame_sync_offset": 1
            })
        );
    }
}
