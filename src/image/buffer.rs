//! Fixed-capacity sector buffer with an explicit validity state

use crate::format::MAX_SECTOR_SIZE;

/// Whether the buffer may be served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// A fetch must populate the buffer before any byte is returned
    Invalid,
    /// Holds the first `len` bytes of the sector under the cursor
    Valid {
        /// Number of valid bytes
        len: usize,
    },
}

/// Holds the most recently fetched sector
#[derive(Clone)]
pub struct SectorBuffer {
    data: [u8; MAX_SECTOR_SIZE],
    state: BufferState,
}

impl SectorBuffer {
    /// Create an empty, invalid buffer
    pub fn new() -> Self {
        Self {
            data: [0; MAX_SECTOR_SIZE],
            state: BufferState::Invalid,
        }
    }

    /// Current validity state
    pub fn state(&self) -> BufferState {
        self.state
    }

    /// Check whether bytes may be served without a fetch
    pub fn is_valid(&self) -> bool {
        matches!(self.state, BufferState::Valid { .. })
    }

    /// Mark the contents stale
    pub fn invalidate(&mut self) {
        self.state = BufferState::Invalid;
    }

    /// Valid contents, or `None` while a fetch is pending
    pub fn data(&self) -> Option<&[u8]> {
        match self.state {
            BufferState::Valid { len } => Some(&self.data[..len]),
            BufferState::Invalid => None,
        }
    }

    /// Writable region for a fetch of `len` bytes. Invalidates the buffer
    /// until [`SectorBuffer::mark_valid`] is called.
    ///
    /// `len` must not exceed [`MAX_SECTOR_SIZE`].
    pub(crate) fn slot(&mut self, len: usize) -> &mut [u8] {
        self.state = BufferState::Invalid;
        &mut self.data[..len]
    }

    /// Declare the first `len` bytes as a complete sector
    pub(crate) fn mark_valid(&mut self, len: usize) {
        self.state = BufferState::Valid { len };
    }
}

impl Default for SectorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SectorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectorBuffer")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_invalid() {
        let buffer = SectorBuffer::new();
        assert_eq!(buffer.state(), BufferState::Invalid);
        assert!(buffer.data().is_none());
    }

    #[test]
    fn test_fill_and_invalidate() {
        let mut buffer = SectorBuffer::new();
        buffer.slot(4).copy_from_slice(&[1, 2, 3, 4]);
        assert!(!buffer.is_valid());

        buffer.mark_valid(4);
        assert_eq!(buffer.data(), Some(&[1u8, 2, 3, 4][..]));

        buffer.invalidate();
        assert!(buffer.data().is_none());
    }

    #[test]
    fn test_slot_discards_previous_sector() {
        let mut buffer = SectorBuffer::new();
        buffer.slot(2).copy_from_slice(&[9, 9]);
        buffer.mark_valid(2);

        let _ = buffer.slot(2);
        assert_eq!(buffer.state(), BufferState::Invalid);
    }

    #[test]
    fn test_capacity() {
        let mut buffer = SectorBuffer::new();
        assert_eq!(buffer.slot(MAX_SECTOR_SIZE).len(), MAX_SECTOR_SIZE);
    }
}
