//! MPEG audio frame-sync detection

/// Offset of the first `0xFF` byte followed by a byte with its top three bits
/// set (`11111111 111xxxxx`). Stops at the first match; a trailing `0xFF`
/// never matches.
pub fn find_frame_sync(content: &[u8]) -> Option<usize> {
    content
        .windows(2)
        .position(|pair| pair[0] == 0xFF && pair[1] & 0xE0 == 0xE0)
}
