//! Disk image engine: CHS seeks, lazy sector fetch and byte streaming

/// Sector buffer and validity state
pub mod buffer;
/// Builder for loading images with options
pub mod builder;
/// CHS cursor
pub mod cursor;

pub use buffer::{BufferState, SectorBuffer};
pub use builder::DiskImageBuilder;
pub use cursor::SectorCursor;

use crate::error::{FddError, Result};
use crate::fdc::{self, ErrorLatch};
use crate::format::Geometry;
use crate::io::{self, ImageFile};
use log::{trace, warn};
use std::fs::File;
use std::path::Path;

/// An open disk image served one sector at a time
///
/// The image exclusively owns its file handle until [`DiskImage::into_inner`]
/// hands it back. Seeking only moves the cursor; the sector is read from the
/// file on the first [`DiskImage::next_byte`] after it.
#[derive(Debug)]
pub struct DiskImage<F> {
    file: F,
    geometry: Geometry,
    cursor: SectorCursor,
    buffer: SectorBuffer,
}

impl DiskImage<File> {
    /// Open an image file from disk with a detected or default geometry
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = io::open_image(path)?;
        Self::load(file)
    }
}

impl<F: ImageFile> DiskImage<F> {
    /// Bind an open file, detecting the geometry from its length
    pub fn load(file: F) -> Result<Self> {
        DiskImageBuilder::new().load(file)
    }

    /// Bind an open file with a fixed geometry
    pub fn load_with(file: F, geometry: Geometry) -> Result<Self> {
        DiskImageBuilder::new().geometry(geometry).load(file)
    }

    /// Create a new builder for loading with options
    pub fn builder() -> DiskImageBuilder {
        DiskImageBuilder::new()
    }

    pub(crate) fn from_parts(file: F, geometry: Geometry) -> Self {
        Self {
            file,
            geometry,
            cursor: SectorCursor::new(),
            buffer: SectorBuffer::new(),
        }
    }

    /// Move to a sector. Always invalidates the buffer, even when the
    /// address is unchanged, so the next byte forces a fresh read.
    pub fn seek(&mut self, side: u8, track: u8, sector: u8) -> Result<()> {
        if let Err(err) = self.geometry.validate(side, track, sector) {
            warn!("seek(): rejected CHS {}/{}/{}", side, track, sector);
            return Err(err);
        }

        trace!("seek(): CHS {}/{}/{}", side, track, sector);
        self.cursor.set(side, track, sector);
        self.buffer.invalidate();
        Ok(())
    }

    /// Read the sector under the cursor into the buffer if it is not
    /// already valid
    ///
    /// A short read or I/O error leaves the buffer invalid, so the next
    /// call retries instead of serving stale bytes.
    pub fn fetch(&mut self) -> Result<()> {
        if self.buffer.is_valid() {
            return Ok(());
        }

        let (side, track, sector) = self.cursor.chs();
        let offset = self.geometry.offset_of(side, track, sector)?;
        let len = self.geometry.sector_size() as usize;

        trace!(
            "fetch(): CHS {}/{}/{} at offset {}",
            side,
            track,
            sector,
            offset
        );

        let actual = match self.file.read_at(offset, self.buffer.slot(len)) {
            Ok(n) => n,
            Err(e) => {
                warn!("fetch(): I/O error at offset {}: {}", offset, e);
                return Err(FddError::Io(e));
            }
        };

        if actual < len {
            warn!(
                "fetch(): short read at offset {}: {} of {} bytes",
                offset, actual, len
            );
            return Err(FddError::ReadFailure {
                side,
                track,
                sector,
                offset,
                expected: len,
                actual,
            });
        }

        self.buffer.mark_valid(len);
        Ok(())
    }

    /// Return the next byte of the current sector
    ///
    /// Fetches first if the buffer is invalid. After the last byte the
    /// offset wraps to 0 and the same sector is served again; moving to
    /// another sector takes an explicit [`DiskImage::seek`]. On a failed
    /// fetch the offset does not move.
    pub fn next_byte(&mut self) -> Result<u8> {
        let pos = self.cursor.offset() as usize;
        let byte = self.valid_data()?[pos];
        self.cursor.advance(self.geometry.sector_size());
        Ok(byte)
    }

    /// Seek to a sector and return its full contents
    pub fn read_sector(&mut self, side: u8, track: u8, sector: u8) -> Result<&[u8]> {
        self.seek(side, track, sector)?;
        self.valid_data()
    }

    /// Reset the protocol layer's latched error. Cursor and buffer state
    /// are left alone; this never fails.
    pub fn clear_error(&self, latch: &mut ErrorLatch) -> Result<()> {
        fdc::clear_error(latch)
    }

    fn valid_data(&mut self) -> Result<&[u8]> {
        self.fetch()?;
        self.buffer
            .data()
            .ok_or_else(|| FddError::backend("sector buffer not populated"))
    }

    /// Get the image geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Get the current cursor position
    pub fn cursor(&self) -> &SectorCursor {
        &self.cursor
    }

    /// Get the sector buffer state
    pub fn state(&self) -> BufferState {
        self.buffer.state()
    }

    /// Check whether a fetch is required before the next byte is served
    pub fn is_ready(&self) -> bool {
        !self.buffer.is_valid()
    }

    /// Contents of the buffered sector, or `None` if a fetch is pending
    pub fn sector_data(&self) -> Option<&[u8]> {
        self.buffer.data()
    }

    /// Byte offset of the cursor's sector within the image file
    pub fn sector_offset(&self) -> u64 {
        let (side, track, sector) = self.cursor.chs();
        // The cursor only ever holds validated addresses
        self.geometry.offset_of(side, track, sector).unwrap_or(0)
    }

    /// Get a reference to the underlying file
    pub fn get_ref(&self) -> &F {
        &self.file
    }

    /// Get a mutable reference to the underlying file
    ///
    /// Reading through it does not disturb the buffered sector, but any
    /// change to the file contents is only seen after the next seek.
    pub fn get_mut(&mut self) -> &mut F {
        &mut self.file
    }

    /// Release the image and hand back the file handle
    pub fn into_inner(self) -> F {
        self.file
    }
}
