//! Error types for content probing

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Content declared as MPEG audio did not look like it
    Format(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for ProbeError {}

pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = ProbeError::Format("no frame sync".to_string());
        assert_eq!(format!("{}", err), "Format error: no frame sync");
    }
}
