//! FDD image constants

/// Capacity of the sector buffer; no geometry may use larger sectors
pub const MAX_SECTOR_SIZE: usize = 1024;

/// Smallest sector size an FDC can address (size code 0)
pub const MIN_SECTOR_SIZE: usize = 128;

/// Maximum number of sides on a physical floppy
pub const MAX_SIDES: u8 = 2;

/// First sector number on every track
pub const FIRST_SECTOR: u8 = 1;

/// Directory holding disk images on the storage card
pub const DEFAULT_IMAGE_DIR: &str = "vector06c";

/// Image file name loaded when none is given
pub const DEFAULT_IMAGE_NAME: &str = "floppy.fdd";

/// File extension of raw sector-dump images
pub const FDD_EXTENSION: &str = "fdd";

/// FDC sector size code to actual byte size mapping
/// Index: size_code (0-3), Value: actual size in bytes
pub const FDC_SECTOR_SIZES: [usize; 4] = [
    128,  // 0
    256,  // 1
    512,  // 2
    1024, // 3
];

/// Convert FDC size code to actual byte size
#[inline]
pub fn fdc_size_to_bytes(size_code: u8) -> Option<usize> {
    FDC_SECTOR_SIZES.get(size_code as usize).copied()
}

/// Convert byte size to FDC size code
#[inline]
pub fn bytes_to_fdc_size(bytes: usize) -> Option<u8> {
    FDC_SECTOR_SIZES
        .iter()
        .position(|&size| size == bytes)
        .map(|code| code as u8)
}
