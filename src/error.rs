//! Error types and Result alias

use crate::fdc::FdcStatus;
use thiserror::Error;

/// Result type alias for disk image operations
pub type Result<T> = std::result::Result<T, FddError>;

/// Errors that can occur while serving sectors from a disk image
#[derive(Debug, Error)]
pub enum FddError {
    /// The storage backend handle is invalid or the image could not be opened
    #[error("Backend unavailable: {reason}")]
    BackendUnavailable {
        /// Why the backend could not be used
        reason: String,
    },

    /// Seek coordinates outside the image geometry
    #[error("Address out of range: side {side}, track {track}, sector {sector}")]
    OutOfRangeAddress {
        /// Side number
        side: u8,
        /// Track number
        track: u8,
        /// Sector number (1-based)
        sector: u8,
    },

    /// The backend returned fewer bytes than a whole sector
    #[error(
        "Read failure at offset {offset} (side {side}, track {track}, sector {sector}): \
         expected {expected} bytes, got {actual}"
    )]
    ReadFailure {
        /// Side number
        side: u8,
        /// Track number
        track: u8,
        /// Sector number (1-based)
        sector: u8,
        /// Byte offset in the image file
        offset: u64,
        /// Bytes requested
        expected: usize,
        /// Bytes actually read
        actual: usize,
    },

    /// I/O error reported by the backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Geometry parameters outside supported bounds
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl FddError {
    /// Create a backend unavailable error
    pub fn backend<S: Into<String>>(reason: S) -> Self {
        FddError::BackendUnavailable {
            reason: reason.into(),
        }
    }

    /// Create an invalid geometry error
    pub fn geometry<S: Into<String>>(message: S) -> Self {
        FddError::InvalidGeometry(message.into())
    }

    /// Check whether this error came out of a sector fetch
    pub fn is_read_failure(&self) -> bool {
        matches!(self, FddError::ReadFailure { .. } | FddError::Io(_))
    }

    /// FDC-style status register value reported to the disk interface
    pub fn status(&self) -> FdcStatus {
        let bits = match self {
            FddError::BackendUnavailable { .. } => FdcStatus::NR,
            FddError::OutOfRangeAddress { .. } => FdcStatus::ND,
            FddError::ReadFailure { .. } | FddError::Io(_) => FdcStatus::DE,
            FddError::InvalidGeometry(_) => FdcStatus::MA,
        };
        FdcStatus::new(bits)
    }
}
