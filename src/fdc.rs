//! Disk interface status reporting
//!
//! Bit layout follows the NEC uPD765 Status Register 1, with the otherwise
//! unused bit 6 carrying the drive "not ready" condition.

use crate::error::{FddError, Result};
use std::fmt;

/// Status byte reported back to the disk interface controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FdcStatus(pub u8);

impl FdcStatus {
    /// End of Cylinder (EN) - Bit 7
    pub const EN: u8 = 0x80;

    /// Not Ready (NR) - Bit 6
    /// Set when no image is attached or the backend cannot be used
    pub const NR: u8 = 0x40;

    /// Data Error (DE) - Bit 5
    /// Set when a sector could not be read in full
    pub const DE: u8 = 0x20;

    /// No Data (ND) - Bit 2
    /// Set if the requested sector does not exist on the image
    pub const ND: u8 = 0x04;

    /// Missing Address Mark (MA) - Bit 0
    pub const MA: u8 = 0x01;

    /// Create a new status from a raw byte
    #[inline]
    pub fn new(value: u8) -> Self {
        FdcStatus(value)
    }

    /// Status with no flags set
    #[inline]
    pub fn ok() -> Self {
        FdcStatus(0)
    }

    /// Check if end of cylinder bit is set
    #[inline]
    pub fn end_of_cylinder(&self) -> bool {
        (self.0 & Self::EN) != 0
    }

    /// Check if not ready bit is set
    #[inline]
    pub fn not_ready(&self) -> bool {
        (self.0 & Self::NR) != 0
    }

    /// Check if data error bit is set
    #[inline]
    pub fn data_error(&self) -> bool {
        (self.0 & Self::DE) != 0
    }

    /// Check if no data bit is set
    #[inline]
    pub fn no_data(&self) -> bool {
        (self.0 & Self::ND) != 0
    }

    /// Check if missing address mark bit is set
    #[inline]
    pub fn missing_address_mark(&self) -> bool {
        (self.0 & Self::MA) != 0
    }

    /// Check if any error flag is set
    #[inline]
    pub fn has_error(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for FdcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "OK");
        }

        let mut flags = Vec::new();
        if self.end_of_cylinder() {
            flags.push("EN");
        }
        if self.not_ready() {
            flags.push("NR");
        }
        if self.data_error() {
            flags.push("DE");
        }
        if self.no_data() {
            flags.push("ND");
        }
        if self.missing_address_mark() {
            flags.push("MA");
        }
        write!(f, "{}", flags.join("|"))
    }
}

/// Latched error indicator owned by the disk interface protocol layer
///
/// The first failure since the last [`ErrorLatch::clear`] is kept; later
/// failures do not overwrite it. The latch is independent of any image's
/// cursor or buffer state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorLatch {
    latched: Option<FdcStatus>,
}

impl ErrorLatch {
    /// Create a clear latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch the status of an error unless one is already held
    pub fn record(&mut self, err: &FddError) {
        if self.latched.is_none() {
            self.latched = Some(err.status());
        }
    }

    /// Pass a result through, latching its error if it failed
    pub fn check<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.record(err);
        }
        result
    }

    /// Check whether an error is latched
    pub fn is_set(&self) -> bool {
        self.latched.is_some()
    }

    /// Latched status, or OK when clear
    pub fn status(&self) -> FdcStatus {
        self.latched.unwrap_or_default()
    }

    /// Reset to the clear state
    pub fn clear(&mut self) {
        self.latched = None;
    }
}

/// Reset the protocol layer's latched error. Never fails.
pub fn clear_error(latch: &mut ErrorLatch) -> Result<()> {
    latch.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fdc_status_flags() {
        let st = FdcStatus(FdcStatus::DE | FdcStatus::ND);
        assert!(st.data_error());
        assert!(st.no_data());
        assert!(!st.not_ready());
        assert!(st.has_error());
        assert!(!FdcStatus::ok().has_error());
    }

    #[test]
    fn test_fdc_status_display() {
        let st = FdcStatus(FdcStatus::EN | FdcStatus::ND);
        assert_eq!(st.to_string(), "EN|ND");
        assert_eq!(FdcStatus::new(FdcStatus::NR).to_string(), "NR");
        assert_eq!(FdcStatus::ok().to_string(), "OK");
    }

    #[test]
    fn test_latch_keeps_first_error() {
        let mut latch = ErrorLatch::new();
        assert!(!latch.is_set());
        assert_eq!(latch.status(), FdcStatus::ok());

        latch.record(&FddError::backend("no card"));
        latch.record(&FddError::OutOfRangeAddress {
            side: 3,
            track: 0,
            sector: 1,
        });

        assert!(latch.is_set());
        assert!(latch.status().not_ready());
        assert!(!latch.status().no_data());
    }

    #[test]
    fn test_latch_check_passes_through() {
        let mut latch = ErrorLatch::new();

        let ok: Result<u8> = Ok(7);
        assert_eq!(latch.check(ok).unwrap(), 7);
        assert!(!latch.is_set());

        let failed: Result<u8> = Err(FddError::geometry("zero sides"));
        assert!(latch.check(failed).is_err());
        assert!(latch.status().missing_address_mark());
    }

    #[test]
    fn test_clear_error_always_succeeds() {
        let mut latch = ErrorLatch::new();
        assert!(clear_error(&mut latch).is_ok());

        latch.record(&FddError::backend("gone"));
        assert!(clear_error(&mut latch).is_ok());
        assert!(!latch.is_set());
    }
}
