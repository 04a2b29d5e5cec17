//! Sector cursor: the CHS position being served and the offset within it

use crate::format::FIRST_SECTOR;

/// Current side, track, sector and intra-sector byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorCursor {
    side: u8,
    track: u8,
    sector: u8,
    offset: u16,
}

impl SectorCursor {
    /// Cursor at side 0, track 0, first sector, offset 0
    pub fn new() -> Self {
        Self {
            side: 0,
            track: 0,
            sector: FIRST_SECTOR,
            offset: 0,
        }
    }

    /// Current side
    pub fn side(&self) -> u8 {
        self.side
    }

    /// Current track
    pub fn track(&self) -> u8 {
        self.track
    }

    /// Current sector (1-based)
    pub fn sector(&self) -> u8 {
        self.sector
    }

    /// Offset of the next byte within the sector
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Side, track and sector as a tuple
    pub fn chs(&self) -> (u8, u8, u8) {
        (self.side, self.track, self.sector)
    }

    /// Move to a new sector and rewind to its first byte
    pub(crate) fn set(&mut self, side: u8, track: u8, sector: u8) {
        self.side = side;
        self.track = track;
        self.sector = sector;
        self.offset = 0;
    }

    /// Step to the next byte, wrapping to 0 at the end of the sector.
    /// The sector address never changes here.
    pub(crate) fn advance(&mut self, sector_size: u16) {
        self.offset += 1;
        if self.offset >= sector_size {
            self.offset = 0;
        }
    }
}

impl Default for SectorCursor {
    fn default() -> Self {
        Self::new()
    }
}
