/// In-place directory metadata mutation
///
/// Every operation here is a targeted overwrite of part of one 32-byte
/// slot, never a full sector rewrite. Entries are never physically
/// removed; deletion rewrites the status byte and a later create reuses
/// the slot.
use crate::directory::{find_by_name, find_free_slot, FoundEntry};
use crate::entry::{encode, parse_filename, DirEntry};
use crate::error::{FatError, Result};
use crate::image::FatImage;
use crate::layout::{dir_slot_offset, ENTRY_DELETED};

/// Byte position of the size field within a slot
const SIZE_FIELD_OFFSET: u64 = 28;

/// Create a fresh zero-length entry for `name` in the first reusable
/// slot
///
/// Refuses a name that already has a live entry, keeping trimmed names
/// unique across the directory. The new entry overwrites a Free or
/// Deleted slot in place.
pub fn create_entry(image: &mut FatImage, name: &str) -> Result<FoundEntry> {
    let (stem, ext) = parse_filename(name)?;
    if find_by_name(image, &stem, &ext)?.is_some() {
        return Err(FatError::FileExists(name.to_string()));
    }
    let index = find_free_slot(image)?.ok_or(FatError::DirectoryFull)?;
    let entry = DirEntry {
        name: stem,
        ext,
        size: 0,
    };
    image.write_exact_at(dir_slot_offset(index), &encode(&entry))?;
    Ok(FoundEntry { index, entry })
}

/// Mark the slot deleted by rewriting only its status byte
///
/// The rest of the slot is left untouched so inspection tooling can
/// still read the old name and size.
pub fn mark_deleted(image: &mut FatImage, index: usize) -> Result<()> {
    image.write_exact_at(dir_slot_offset(index), &[ENTRY_DELETED])
}

/// Rewrite the stored size field of the slot in place
pub fn update_size(image: &mut FatImage, index: usize, new_size: u32) -> Result<()> {
    image.write_exact_at(
        dir_slot_offset(index) + SIZE_FIELD_OFFSET,
        &new_size.to_le_bytes(),
    )
}
