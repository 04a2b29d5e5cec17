//! Storage backend contract consumed by the disk image engine

use std::io::{self, Read, Seek, SeekFrom};

/// A random-access, read-only view of an image file
///
/// Implemented for every `Read + Seek` type as a seek-then-read pair, so
/// `std::fs::File` and `std::io::Cursor` can back an image directly.
pub trait ImageFile {
    /// Read up to `buf.len()` bytes starting at an absolute offset
    ///
    /// Returns fewer bytes only when the end of the file is reached.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;

    /// Length of the file in bytes
    fn byte_len(&mut self) -> io::Result<u64>;
}

impl<T: Read + Seek> ImageFile for T {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.seek(SeekFrom::Start(offset))?;

        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn byte_len(&mut self) -> io::Result<u64> {
        let pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(pos))?;
        Ok(len)
    }
}
