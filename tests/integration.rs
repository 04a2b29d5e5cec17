/// Integration tests for fddimage

use fddimage::*;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// Cursor that counts read calls
struct CountingFile {
    inner: Cursor<Vec<u8>>,
    reads: usize,
}

impl Read for CountingFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reads += 1;
        self.inner.read(buf)
    }
}

impl Seek for CountingFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// Image where each sector starts with its (side, track, sector) address
fn addressed_image(geometry: &Geometry) -> Vec<u8> {
    let size = geometry.sector_size() as usize;
    let mut data = vec![0xE5; geometry.total_size() as usize];
    for side in 0..geometry.sides() {
        for track in 0..geometry.tracks() {
            for sector in 1..=geometry.sectors_per_track() {
                let offset = geometry.offset_of(side, track, sector).unwrap() as usize;
                data[offset..offset + 3].copy_from_slice(&[side, track, sector]);
                data[offset + size - 1] = 0xAA;
            }
        }
    }
    data
}

#[test]
fn test_stream_vector06c_sector() {
    let geometry = Geometry::vector06c();
    let mut image = DiskImage::load(Cursor::new(addressed_image(&geometry))).expect("Failed to load image");

    assert_eq!(*image.geometry(), geometry);

    image.seek(1, 42, 5).expect("Failed to seek");
    let bytes: Vec<u8> = (0..1024)
        .map(|_| image.next_byte().expect("Failed to read byte"))
        .collect();

    assert_eq!(&bytes[..3], &[1, 42, 5]);
    assert_eq!(bytes[3], 0xE5);
    assert_eq!(bytes[1023], 0xAA);
    assert_eq!(image.cursor().offset(), 0);
}

#[test]
fn test_controller_walks_track() {
    let geometry = Geometry::pc_720k();
    let file = CountingFile {
        inner: Cursor::new(addressed_image(&geometry)),
        reads: 0,
    };
    let mut image = DiskImage::load(file).expect("Failed to load image");

    // Advancing across sectors is the controller's job
    for sector in 1..=geometry.sectors_per_track() {
        image.seek(0, 10, sector).expect("Failed to seek");
        let header: Vec<u8> = (0..3).map(|_| image.next_byte().unwrap()).collect();
        assert_eq!(header, vec![0, 10, sector]);
    }

    assert_eq!(image.get_ref().reads, geometry.sectors_per_track() as usize);
}

#[test]
fn test_wrap_does_not_advance_sector() {
    let geometry = Geometry::new(1, 2, 2, 128).unwrap();
    let mut image = DiskImage::load_with(Cursor::new(addressed_image(&geometry)), geometry).unwrap();

    image.seek(0, 0, 1).unwrap();
    for _ in 0..128 {
        image.next_byte().unwrap();
    }

    // Byte 0 of the same sector again, not sector 2
    assert_eq!(image.next_byte().unwrap(), 0);
    assert_eq!(image.next_byte().unwrap(), 0);
    assert_eq!(image.next_byte().unwrap(), 1);
    assert_eq!(image.cursor().chs(), (0, 0, 1));
}

#[test]
fn test_truncated_image() {
    let geometry = Geometry::pc_360k();
    let mut data = addressed_image(&geometry);
    data.truncate(geometry.total_size() as usize / 2);

    let mut image = DiskImage::load_with(Cursor::new(data), geometry).expect("Failed to load image");
    let mut latch = ErrorLatch::new();

    // First side is intact
    latch.check(image.seek(0, 39, 9)).unwrap();
    assert_eq!(latch.check(image.next_byte()).unwrap(), 0);

    // Second side is missing
    latch.check(image.seek(1, 0, 1)).unwrap();
    let err = latch.check(image.next_byte()).unwrap_err();
    assert!(matches!(err, FddError::ReadFailure { actual: 0, .. }));
    assert!(latch.status().data_error());
    assert!(image.is_ready());

    image.clear_error(&mut latch).unwrap();
    assert_eq!(latch.status(), FdcStatus::ok());
}

#[test]
fn test_open_from_disk() {
    let geometry = Geometry::vector06c_ss();
    let path = std::env::temp_dir().join(format!("fddimage-{}.fdd", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("Failed to create file");
        file.write_all(&addressed_image(&geometry))
            .expect("Failed to write file");
    }

    let mut image = DiskImage::open(&path).expect("Failed to open image");
    assert_eq!(*image.geometry(), geometry);

    let data = image.read_sector(0, 79, 5).expect("Failed to read sector");
    assert_eq!(&data[..3], &[0, 79, 5]);

    drop(image.into_inner());
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_open_missing_file() {
    let result = DiskImage::open("/nonexistent/floppy.fdd");
    match result {
        Err(err @ FddError::BackendUnavailable { .. }) => assert!(err.status().not_ready()),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("opened a missing file"),
    }
}

#[test]
fn test_borrowed_backend() {
    let geometry = Geometry::pc_360k();
    let mut file = Cursor::new(addressed_image(&geometry));

    {
        let mut image = DiskImage::load(&mut file).expect("Failed to load image");
        image.seek(1, 0, 2).unwrap();
        assert_eq!(image.next_byte().unwrap(), 1);
    }

    // The caller still owns the handle
    assert_eq!(file.get_ref().len(), 368_640);
}
