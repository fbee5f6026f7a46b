/// Filesystem facade over a disk image
///
/// Ties the scanner, content accessor and metadata mutator together
/// behind the small interface the command layer calls: list, read,
/// create, delete, write.
use crate::content::{append_content, read_content, WriteMode};
use crate::directory::{find_by_name, live_entries, FoundEntry};
use crate::entry::parse_filename;
use crate::error::{FatError, Result};
use crate::image::FatImage;
use crate::mutate::{create_entry, mark_deleted, update_size};
use std::path::Path;

/// Summary of one live file for directory listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// File name without extension
    pub name: String,
    /// Extension, possibly empty
    pub ext: String,
    /// Stored size in bytes
    pub size: u32,
    /// Directory slot index
    pub index: usize,
}

impl FileRecord {
    /// Record name in NAME.EXT form
    pub fn display_name(&self) -> String {
        if self.ext.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.ext)
        }
    }
}

/// A mounted FAT-style image
///
/// Owns the image handle for the duration of one command sequence;
/// dropping the value closes the file, on success and failure paths
/// alike.
#[derive(Debug)]
pub struct FatFileSystem {
    image: FatImage,
    write_mode: WriteMode,
}

impl FatFileSystem {
    /// Open an image read-write
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            image: FatImage::open(path)?,
            write_mode: WriteMode::Append,
        })
    }

    /// Open an image read-only; mutating operations will fail with an
    /// I/O error
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            image: FatImage::open_read_only(path)?,
            write_mode: WriteMode::Append,
        })
    }

    /// Select where `write_file` puts its bytes
    pub fn set_write_mode(&mut self, mode: WriteMode) {
        self.write_mode = mode;
    }

    /// Current write mode
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Access the underlying image
    pub fn image(&mut self) -> &mut FatImage {
        &mut self.image
    }

    /// List every live entry in directory order
    pub fn list(&mut self) -> Result<Vec<FileRecord>> {
        Ok(live_entries(&mut self.image)?
            .into_iter()
            .map(|found| FileRecord {
                name: found.entry.name,
                ext: found.entry.ext,
                size: found.entry.size,
                index: found.index,
            })
            .collect())
    }

    /// Read the full content of the named file
    pub fn read_file(&mut self, name: &str) -> Result<Vec<u8>> {
        let found = self.lookup(name)?;
        read_content(&mut self.image, found.index, &found.entry)
    }

    /// Create a new zero-length file
    pub fn create_file(&mut self, name: &str) -> Result<()> {
        create_entry(&mut self.image, name).map(|_| ())
    }

    /// Delete the named file by marking its slot deleted
    pub fn delete_file(&mut self, name: &str) -> Result<()> {
        let found = self.lookup(name)?;
        mark_deleted(&mut self.image, found.index)
    }

    /// Write `length` copies of `fill` into the named file and persist
    /// the new size
    ///
    /// In append mode the bytes land at the current end of content and
    /// `offset` is ignored; in strict-offset mode they land at
    /// `offset`. The content is written before the size field, so a
    /// crash in between leaves the old size with the new bytes already
    /// on disk.
    pub fn write_file(&mut self, name: &str, offset: u32, length: u32, fill: u8) -> Result<u32> {
        let found = self.lookup(name)?;
        let new_size = append_content(
            &mut self.image,
            found.index,
            &found.entry,
            offset,
            length,
            fill,
            self.write_mode,
        )?;
        if new_size != found.entry.size {
            update_size(&mut self.image, found.index, new_size)?;
        }
        Ok(new_size)
    }

    fn lookup(&mut self, name: &str) -> Result<FoundEntry> {
        let (stem, ext) = parse_filename(name)?;
        find_by_name(&mut self.image, &stem, &ext)?
            .ok_or_else(|| FatError::FileNotFound(name.to_string()))
    }
}
