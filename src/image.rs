/// Disk image file access
///
/// All reads and writes go straight to the image file; there is no
/// in-memory copy of the disk and no caching.
use crate::error::{FatError, Result};
use crate::layout::{sector_offset, SECTOR_SIZE};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// An opened disk image file
///
/// The handle is owned by a single command for its duration and closed on
/// every exit path when the value is dropped.
#[derive(Debug)]
pub struct FatImage {
    file: std::fs::File,
    path: String,
    writable: bool,
}

impl FatImage {
    /// Open an existing image read-write
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, true)
    }

    /// Open an existing image read-only
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, false)
    }

    fn open_with<P: AsRef<Path>>(path: P, writable: bool) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let file = OpenOptions::new()
            .read(true)
            .write(writable)
            .open(&path)
            .map_err(|source| FatError::ImageOpen {
                path: path_str.clone(),
                source,
            })?;
        Ok(Self {
            file,
            path: path_str,
            writable,
        })
    }

    /// Create a zero-filled image of `sectors` sectors at `path`,
    /// replacing any existing file
    ///
    /// A fresh image is entirely free directory slots. The contents are
    /// flushed durable before this returns.
    pub fn create<P: AsRef<Path>>(path: P, sectors: u32) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| FatError::ImageOpen {
                path: path_str.clone(),
                source,
            })?;
        let mut image = Self {
            file,
            path: path_str,
            writable: true,
        };
        let zeroes = [0u8; SECTOR_SIZE];
        for sector in 0..sectors {
            image.file.seek(SeekFrom::Start(sector_offset(sector)))?;
            image.file.write_all(&zeroes)?;
        }
        image.file.sync_all()?;
        Ok(image)
    }

    /// Path the image was opened from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the image was opened read-write
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Current length of the image file in bytes
    pub fn len(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Whether the image file is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Read up to `buf.len()` bytes at `offset`, returning how many were
    /// read
    ///
    /// Stops short only at end of file; callers decide whether a short
    /// read is fatal.
    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        self.file.seek(SeekFrom::Start(offset))?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    /// Write `data` at `offset` and force it durable before returning
    ///
    /// Returns how many bytes the file accepted, which is less than
    /// `data.len()` only if the underlying file refused further bytes.
    pub fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<usize> {
        self.file.seek(SeekFrom::Start(offset))?;
        let mut written = 0;
        while written < data.len() {
            match self.file.write(&data[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.file.sync_data()?;
        Ok(written)
    }

    /// Write all of `data` at `offset`; anything less is a short write
    pub fn write_exact_at(&mut self, offset: u64, data: &[u8]) -> Result<()> {
        let wrote = self.write_at(offset, data)?;
        if wrote < data.len() {
            return Err(FatError::ShortWrite {
                sector: (offset / SECTOR_SIZE as u64) as u32,
                wanted: data.len(),
                wrote,
            });
        }
        Ok(())
    }

    /// Read one full sector
    pub fn read_sector(&mut self, sector: u32) -> Result<[u8; SECTOR_SIZE]> {
        let mut buf = [0u8; SECTOR_SIZE];
        let got = self.read_at(sector_offset(sector), &mut buf)?;
        if got < SECTOR_SIZE {
            return Err(FatError::ShortRead {
                sector,
                wanted: SECTOR_SIZE,
                got,
            });
        }
        Ok(buf)
    }

    /// Write one full sector, durable before returning
    pub fn write_sector(&mut self, sector: u32, data: &[u8; SECTOR_SIZE]) -> Result<()> {
        self.write_exact_at(sector_offset(sector), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("fatmod-image-{}-{}.img", std::process::id(), name));
        path
    }

    #[test]
    fn test_create_and_sector_round_trip() {
        let path = scratch_path("roundtrip");
        let mut image = FatImage::create(&path, 4).expect("Failed to create image");
        assert_eq!(image.len().unwrap(), 4 * 512);

        let data = [0x42u8; SECTOR_SIZE];
        image.write_sector(2, &data).expect("Failed to write sector");
        let back = image.read_sector(2).expect("Failed to read sector");
        assert_eq!(back, data);

        // Neighboring sectors stay zero
        let untouched = image.read_sector(1).expect("Failed to read sector");
        assert!(untouched.iter().all(|&b| b == 0));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_short_read_past_end() {
        let path = scratch_path("shortread");
        let mut image = FatImage::create(&path, 2).expect("Failed to create image");

        let result = image.read_sector(2);
        assert!(matches!(
            result,
            Err(FatError::ShortRead {
                sector: 2,
                wanted: 512,
                got: 0,
            })
        ));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_open_missing_image() {
        let result = FatImage::open("/nonexistent/no-such-image.img");
        assert!(matches!(result, Err(FatError::ImageOpen { .. })));
    }

    #[test]
    fn test_read_at_partial() {
        let path = scratch_path("partial");
        let mut image = FatImage::create(&path, 1).expect("Failed to create image");

        let mut buf = [0u8; 64];
        // 32 bytes before the end of the file
        let got = image.read_at(512 - 32, &mut buf).expect("read_at failed");
        assert_eq!(got, 32);

        let _ = std::fs::remove_file(&path);
    }
}
