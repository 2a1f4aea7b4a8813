//! MPEG blob probing
//!
//! Classifies downloaded blobs by their declared content type. MPEG audio is
//! checked for a leading ID3v2 tag and for the first MPEG frame-sync marker;
//! anything else gets a short escaped preview of its leading bytes. Nothing
//! here decodes audio.

pub mod error;
pub mod frame;
pub mod id3;
pub mod probe;

pub use error::{ProbeError, Result};
pub use frame::find_frame_sync;
pub use id3::{decode_synchsafe, detect_id3, Id3Detection, Id3Header};
pub use probe::{
    probe, probe_with, Preview, ProbeOptions, ProbeResult, MPEG_CONTENT_TYPE, PREVIEW_LEN,
};
