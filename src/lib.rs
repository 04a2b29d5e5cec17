/*!
# fddimage

Floppy disk emulation over flat FDD image files, for disk-interface
controllers that address sectors by cylinder/head/sector and then stream
bytes.

## Features

- Geometry presets for Vector-06C and PC formats, detected from image size
- CHS to file offset translation with strict bounds checking
- Lazy, one-sector-at-a-time reads from any `Read + Seek` backend
- Byte streaming that wraps within a sector and never crosses into the next
- FDC-style status bytes and a latched error indicator for the protocol layer

## Quick Start

```rust,no_run
use fddimage::{DiskImage, ErrorLatch};

// Open an image; geometry is detected from its size
let mut image = DiskImage::open("vector06c/floppy.fdd")?;
let mut latch = ErrorLatch::new();

// Seek to side 1, track 39, sector 3 and stream the sector
latch.check(image.seek(1, 39, 3))?;
let size = image.geometry().sector_size();
for _ in 0..size {
    let byte = latch.check(image.next_byte())?;
    print!("{:02x}", byte);
}

// Hand the latched status to the host, then reset it
println!("\nstatus: {}", latch.status());
image.clear_error(&mut latch)?;
# Ok::<(), fddimage::FddError>(())
```

## Modules

- `format`: Geometry descriptor and constants
- `image`: Disk image engine, cursor and sector buffer
- `io`: Storage backend contract and file helpers
- `fdc`: Status bytes and the latched error indicator
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// Error types and Result alias
pub mod error;
/// Disk interface status bytes and error latch
pub mod fdc;
/// FDD geometry and constants
pub mod format;
/// Disk image engine (DiskImage, SectorCursor, SectorBuffer)
pub mod image;
/// Storage backend access for image files
pub mod io;

// Re-export common types
pub use error::{FddError, Result};
pub use fdc::{clear_error, ErrorLatch, FdcStatus};
pub use format::{Geometry, MAX_SECTOR_SIZE};
pub use image::{BufferState, DiskImage, DiskImageBuilder, SectorBuffer, SectorCursor};
pub use io::ImageFile;
