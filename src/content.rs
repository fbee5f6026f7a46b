/// File content access within the data region
///
/// Each directory slot owns a single allocation unit; the stored size
/// field is the byte length of the content inside that unit. Files never
/// span allocation units.
use crate::entry::DirEntry;
use crate::error::{FatError, Result};
use crate::image::FatImage;
use crate::layout::{data_unit_offset, CLUSTER_SIZE};

/// Where a write lands inside the file's allocation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write at the current end of content; the caller's offset is
    /// ignored
    #[default]
    Append,
    /// Write at the caller's offset, which must not leave a gap past
    /// the current end of content
    StrictOffset,
}

/// Read the full content of an entry
///
/// Seeks to the slot's allocation unit and reads exactly `size` bytes.
/// A stored size past the allocation unit, a range past the end of the
/// image, or a short read all fail rather than returning truncated
/// content.
pub fn read_content(image: &mut FatImage, slot: usize, entry: &DirEntry) -> Result<Vec<u8>> {
    let size = entry.size as usize;
    if size == 0 {
        return Ok(Vec::new());
    }
    if size > CLUSTER_SIZE {
        return Err(FatError::unreadable(format!(
            "size {} exceeds the {}-byte allocation unit",
            size, CLUSTER_SIZE
        )));
    }
    let offset = data_unit_offset(slot);
    let end = offset + size as u64;
    if end > image.len()? {
        return Err(FatError::unreadable(format!(
            "content range {}..{} lies past the end of the image",
            offset, end
        )));
    }
    let mut buf = vec![0u8; size];
    let got = image.read_at(offset, &mut buf)?;
    if got < size {
        return Err(FatError::unreadable(format!(
            "read {} of {} bytes",
            got, size
        )));
    }
    Ok(buf)
}

/// Write `length` copies of `fill` into the entry's allocation unit
///
/// Append mode starts at the current end of content; strict-offset mode
/// starts at `offset`. Returns the new size for the caller to persist
/// into the directory slot; the entry on disk is not touched here.
pub fn append_content(
    image: &mut FatImage,
    slot: usize,
    entry: &DirEntry,
    offset: u32,
    length: u32,
    fill: u8,
    mode: WriteMode,
) -> Result<u32> {
    let start = match mode {
        WriteMode::Append => entry.size,
        WriteMode::StrictOffset => offset,
    };
    if start > entry.size {
        return Err(FatError::unwritable(format!(
            "offset {} is past the current end of content ({} bytes)",
            start, entry.size
        )));
    }
    let end = start.checked_add(length).ok_or_else(|| {
        FatError::unwritable(format!("length {} overflows the size field", length))
    })?;
    if end as usize > CLUSTER_SIZE {
        return Err(FatError::unwritable(format!(
            "write up to byte {} exceeds the {}-byte allocation unit",
            end, CLUSTER_SIZE
        )));
    }
    if length == 0 {
        return Ok(entry.size);
    }
    let buf = vec![fill; length as usize];
    let wrote = image.write_at(data_unit_offset(slot) + start as u64, &buf)?;
    if wrote < length as usize {
        return Err(FatError::unwritable(format!(
            "wrote {} of {} bytes",
            wrote, length
        )));
    }
    Ok(entry.size.max(end))
}
