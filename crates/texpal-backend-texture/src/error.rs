//! Error type for the palette texture backend.

use std::path::PathBuf;

use thiserror::Error;

use texpal_spec::BackendError;

use crate::png::PngError;

/// Errors from palette texture generation.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// More sub-materials than grid cells.
    #[error("{count} sub-material(s) exceed the grid capacity of {capacity} cell(s)")]
    CapacityExceeded { count: usize, capacity: usize },

    /// A slot index past the end of the grid.
    #[error("slot {index} is out of range for a grid of {capacity} cell(s)")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// The grid configuration failed validation.
    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),

    /// A sub-material parameter is unusable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("PNG error: {0}")]
    Png(#[from] PngError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata serialization error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// A rename failed after earlier outputs had already been replaced.
    #[error("{} output file(s) replaced before a rename failed: {source}", .replaced.len())]
    PartialReplace {
        replaced: Vec<PathBuf>,
        source: std::io::Error,
    },
}

impl BackendError for PaletteError {
    fn code(&self) -> &'static str {
        match self {
            PaletteError::CapacityExceeded { .. } => "PALETTE_001",
            PaletteError::IndexOutOfRange { .. } => "PALETTE_002",
            PaletteError::InvalidConfig(_) => "PALETTE_003",
            PaletteError::InvalidParameter(_) => "PALETTE_004",
            PaletteError::Png(_) => "PALETTE_005",
            PaletteError::Io(_) => "PALETTE_006",
            PaletteError::Metadata(_) => "PALETTE_007",
            PaletteError::PartialReplace { .. } => "PALETTE_008",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            PaletteError::Png(_)
            | PaletteError::Io(_)
            | PaletteError::Metadata(_)
            | PaletteError::PartialReplace { .. } => "output",
            _ => "palette",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let err = PaletteError::CapacityExceeded {
            count: 17,
            capacity: 16,
        };
        assert_eq!(err.code(), "PALETTE_001");
        assert_eq!(err.category(), "palette");
        assert_eq!(
            err.message(),
            "17 sub-material(s) exceed the grid capacity of 16 cell(s)"
        );
    }
}
