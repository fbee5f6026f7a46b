/// Directory region scanning
///
/// One 32-byte slot per step, with an explicit position and termination
/// flag. A Free slot ends the valid directory; a short read means the
/// image file itself ended.
use crate::entry::{classify, decode, DirEntry, EntryKind};
use crate::error::Result;
use crate::image::FatImage;
use crate::layout::{dir_slot_offset, DIR_CAPACITY, DIR_ENTRY_SIZE};

/// A directory entry located by a scan, with its slot index
#[derive(Debug, Clone)]
pub struct FoundEntry {
    /// Slot index from the start of the directory region
    pub index: usize,
    /// Decoded entry
    pub entry: DirEntry,
}

impl FoundEntry {
    /// Absolute byte offset of the slot within the image
    pub fn byte_offset(&self) -> u64 {
        dir_slot_offset(self.index)
    }
}

/// Stepwise scanner over the directory region
#[derive(Debug)]
pub struct DirectoryScanner {
    index: usize,
    exhausted: bool,
}

impl DirectoryScanner {
    /// Scanner positioned at the start of the directory region
    pub fn new() -> Self {
        Self {
            index: 0,
            exhausted: false,
        }
    }

    /// Current slot index
    pub fn position(&self) -> usize {
        self.index
    }

    /// Whether the scan has terminated
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Read the next slot and advance
    ///
    /// Returns the slot index, raw bytes and classification, or `None`
    /// once the region capacity is reached or a read came back with
    /// fewer than 32 bytes. The scan never reads past the end of the
    /// image file.
    pub fn step(
        &mut self,
        image: &mut FatImage,
    ) -> Result<Option<(usize, [u8; DIR_ENTRY_SIZE], EntryKind)>> {
        if self.exhausted || self.index >= DIR_CAPACITY {
            self.exhausted = true;
            return Ok(None);
        }
        let mut raw = [0u8; DIR_ENTRY_SIZE];
        let got = image.read_at(dir_slot_offset(self.index), &mut raw)?;
        if got < DIR_ENTRY_SIZE {
            self.exhausted = true;
            return Ok(None);
        }
        let index = self.index;
        self.index += 1;
        Ok(Some((index, raw, classify(&raw))))
    }
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the live entry whose trimmed name and extension match
///
/// Deleted and special slots are skipped; a Free slot ends the search.
pub fn find_by_name(image: &mut FatImage, name: &str, ext: &str) -> Result<Option<FoundEntry>> {
    let mut scanner = DirectoryScanner::new();
    while let Some((index, raw, kind)) = scanner.step(image)? {
        match kind {
            EntryKind::Free => return Ok(None),
            EntryKind::Deleted | EntryKind::Special => continue,
            EntryKind::Live => {
                let entry = decode(&raw);
                if entry.name == name && entry.ext == ext {
                    return Ok(Some(FoundEntry { index, entry }));
                }
            }
        }
    }
    Ok(None)
}

/// Find the first slot a create may claim: Free or Deleted
pub fn find_free_slot(image: &mut FatImage) -> Result<Option<usize>> {
    let mut scanner = DirectoryScanner::new();
    while let Some((index, _raw, kind)) = scanner.step(image)? {
        match kind {
            EntryKind::Free | EntryKind::Deleted => return Ok(Some(index)),
            EntryKind::Special | EntryKind::Live => continue,
        }
    }
    Ok(None)
}

/// Collect every live entry from the start of the directory region up
/// to the first Free slot
pub fn live_entries(image: &mut FatImage) -> Result<Vec<FoundEntry>> {
    let mut scanner = DirectoryScanner::new();
    let mut entries = Vec::new();
    while let Some((index, raw, kind)) = scanner.step(image)? {
        match kind {
            EntryKind::Free => break,
            EntryKind::Deleted | EntryKind::Special => continue,
            EntryKind::Live => entries.push(FoundEntry {
                index,
                entry: decode(&raw),
            }),
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_entry_offset() {
        let found = FoundEntry {
            index: 3,
            entry: DirEntry {
                name: "A".to_string(),
                ext: String::new(),
                size: 0,
            },
        };
        assert_eq!(found.byte_offset(), 96);
    }

    #[test]
    fn test_scanner_starts_at_zero() {
        let scanner = DirectoryScanner::new();
        assert_eq!(scanner.position(), 0);
        assert!(!scanner.is_exhausted());
    }
}
