//! Builder for loading disk images with non-default options

use crate::error::{FddError, Result};
use crate::format::Geometry;
use crate::image::DiskImage;
use crate::io::ImageFile;
use log::debug;

/// Builder for binding an image file to a [`DiskImage`]
#[derive(Debug, Clone)]
pub struct DiskImageBuilder {
    num_sides: u8,
    num_tracks: u8,
    sectors_per_track: u8,
    sector_size: u16,
    explicit: bool,
    detect_geometry: bool,
    require_full_image: bool,
}

impl DiskImageBuilder {
    /// Create a new builder with default values
    ///
    /// Geometry is detected from the image length, falling back to
    /// [`Geometry::default`] when no preset matches.
    pub fn new() -> Self {
        let default = Geometry::default();
        Self {
            num_sides: default.sides(),
            num_tracks: default.tracks(),
            sectors_per_track: default.sectors_per_track(),
            sector_size: default.sector_size(),
            explicit: false,
            detect_geometry: true,
            require_full_image: false,
        }
    }

    /// Use a fixed geometry instead of detecting one
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.num_sides = geometry.sides();
        self.num_tracks = geometry.tracks();
        self.sectors_per_track = geometry.sectors_per_track();
        self.sector_size = geometry.sector_size();
        self.explicit = true;
        self
    }

    /// Set the number of sides
    pub fn num_sides(mut self, num_sides: u8) -> Self {
        self.num_sides = num_sides;
        self.explicit = true;
        self
    }

    /// Set the number of tracks
    pub fn num_tracks(mut self, num_tracks: u8) -> Self {
        self.num_tracks = num_tracks;
        self.explicit = true;
        self
    }

    /// Set sectors per track
    pub fn sectors_per_track(mut self, sectors_per_track: u8) -> Self {
        self.sectors_per_track = sectors_per_track;
        self.explicit = true;
        self
    }

    /// Set sector size
    pub fn sector_size(mut self, sector_size: u16) -> Self {
        self.sector_size = sector_size;
        self.explicit = true;
        self
    }

    /// Enable or disable geometry detection from the image length.
    /// Ignored once any geometry field is set explicitly.
    pub fn detect_geometry(mut self, detect: bool) -> Self {
        self.detect_geometry = detect;
        self
    }

    /// Reject images shorter than the geometry's total size
    pub fn require_full_image(mut self, require: bool) -> Self {
        self.require_full_image = require;
        self
    }

    /// Bind an open image file. Only the file length is queried; no
    /// sector data is read until the first fetch.
    pub fn load<F: ImageFile>(self, mut file: F) -> Result<DiskImage<F>> {
        let len = file
            .byte_len()
            .map_err(|e| FddError::backend(format!("cannot query image length: {}", e)))?;

        let geometry = if self.explicit {
            Geometry::new(
                self.num_sides,
                self.num_tracks,
                self.sectors_per_track,
                self.sector_size,
            )?
        } else if self.detect_geometry {
            Geometry::detect(len).unwrap_or_default()
        } else {
            Geometry::default()
        };

        if self.require_full_image && len < geometry.total_size() {
            return Err(FddError::backend(format!(
                "image is {} bytes, geometry needs {}",
                len,
                geometry.total_size()
            )));
        }

        debug!("Loaded disk image ({} bytes), geometry: {}", len, geometry);
        Ok(DiskImage::from_parts(file, geometry))
    }
}

impl Default for DiskImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
