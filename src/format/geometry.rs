//! Disk geometry and CHS linearization

use crate::error::{FddError, Result};
use crate::format::constants::{
    bytes_to_fdc_size, FIRST_SECTOR, MAX_SECTOR_SIZE, MAX_SIDES, MIN_SECTOR_SIZE,
};
use std::fmt;

/// Physical layout of a disk image, fixed for as long as the image is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    sides: u8,
    tracks: u8,
    sectors_per_track: u8,
    sector_size: u16,
}

impl Geometry {
    /// Create a validated geometry
    ///
    /// Sides must be 1 or 2, tracks and sectors non-zero, and the sector size
    /// one of the FDC sizes that fits the sector buffer.
    pub fn new(sides: u8, tracks: u8, sectors_per_track: u8, sector_size: u16) -> Result<Self> {
        if sides == 0 || sides > MAX_SIDES {
            return Err(FddError::geometry(format!(
                "{} sides (expected 1 to {})",
                sides, MAX_SIDES
            )));
        }
        if tracks == 0 {
            return Err(FddError::geometry("zero tracks"));
        }
        if sectors_per_track == 0 {
            return Err(FddError::geometry("zero sectors per track"));
        }
        let size = sector_size as usize;
        if !(MIN_SECTOR_SIZE..=MAX_SECTOR_SIZE).contains(&size) || bytes_to_fdc_size(size).is_none()
        {
            return Err(FddError::geometry(format!(
                "sector size {} (expected a power of two from {} to {})",
                sector_size, MIN_SECTOR_SIZE, MAX_SECTOR_SIZE
            )));
        }

        Ok(Self {
            sides,
            tracks,
            sectors_per_track,
            sector_size,
        })
    }

    /// Vector-06C double-sided format (80 tracks, 5 sectors, 1024 bytes)
    pub fn vector06c() -> Self {
        Self {
            sides: 2,
            tracks: 80,
            sectors_per_track: 5,
            sector_size: 1024,
        }
    }

    /// Vector-06C single-sided format (80 tracks, 5 sectors, 1024 bytes)
    pub fn vector06c_ss() -> Self {
        Self {
            sides: 1,
            ..Self::vector06c()
        }
    }

    /// PC 5.25" 360K format (40 tracks, 9 sectors, 512 bytes, 2 sides)
    pub fn pc_360k() -> Self {
        Self {
            sides: 2,
            tracks: 40,
            sectors_per_track: 9,
            sector_size: 512,
        }
    }

    /// PC 3.5" 720K format (80 tracks, 9 sectors, 512 bytes, 2 sides)
    pub fn pc_720k() -> Self {
        Self {
            tracks: 80,
            ..Self::pc_360k()
        }
    }

    /// PC 5.25" 1.2M format (80 tracks, 15 sectors, 512 bytes, 2 sides)
    pub fn pc_1200k() -> Self {
        Self {
            sectors_per_track: 15,
            ..Self::pc_720k()
        }
    }

    /// PC 3.5" 1.44M format (80 tracks, 18 sectors, 512 bytes, 2 sides)
    pub fn pc_1440k() -> Self {
        Self {
            sectors_per_track: 18,
            ..Self::pc_720k()
        }
    }

    /// All known formats, in detection priority order
    pub fn presets() -> [Geometry; 6] {
        [
            Self::vector06c(),
            Self::vector06c_ss(),
            Self::pc_360k(),
            Self::pc_720k(),
            Self::pc_1200k(),
            Self::pc_1440k(),
        ]
    }

    /// Find the preset whose total size matches an image length exactly
    pub fn detect(image_len: u64) -> Option<Geometry> {
        Self::presets()
            .into_iter()
            .find(|g| g.total_size() == image_len)
    }

    /// Number of sides
    pub fn sides(&self) -> u8 {
        self.sides
    }

    /// Number of tracks per side
    pub fn tracks(&self) -> u8 {
        self.tracks
    }

    /// Sectors per track
    pub fn sectors_per_track(&self) -> u8 {
        self.sectors_per_track
    }

    /// Sector size in bytes
    pub fn sector_size(&self) -> u16 {
        self.sector_size
    }

    /// Total image size in bytes
    pub fn total_size(&self) -> u64 {
        self.sides as u64
            * self.tracks as u64
            * self.sectors_per_track as u64
            * self.sector_size as u64
    }

    /// Check whether a CHS address exists on this geometry
    pub fn contains(&self, side: u8, track: u8, sector: u8) -> bool {
        side < self.sides
            && track < self.tracks
            && sector >= FIRST_SECTOR
            && sector - FIRST_SECTOR < self.sectors_per_track
    }

    /// Reject a CHS address that does not exist on this geometry
    pub fn validate(&self, side: u8, track: u8, sector: u8) -> Result<()> {
        if self.contains(side, track, sector) {
            Ok(())
        } else {
            Err(FddError::OutOfRangeAddress {
                side,
                track,
                sector,
            })
        }
    }

    /// Byte offset of a sector within the image file
    ///
    /// Sides are stored one after the other, each side's tracks in order,
    /// and sectors are numbered from 1.
    pub fn offset_of(&self, side: u8, track: u8, sector: u8) -> Result<u64> {
        self.validate(side, track, sector)?;

        let track_index = side as u64 * self.tracks as u64 + track as u64;
        let sector_index = track_index * self.sectors_per_track as u64
            + (sector - FIRST_SECTOR) as u64;
        Ok(sector_index * self.sector_size as u64)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::vector06c()
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} side(s), {} tracks, {} x {} byte sectors",
            self.sides, self.tracks, self.sectors_per_track, self.sector_size
        )
    }
}
