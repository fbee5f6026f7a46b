/// On-disk geometry constants and offset arithmetic

/// Size of one sector in bytes
pub const SECTOR_SIZE: usize = 512;

/// Size of one allocation unit (cluster) in bytes
pub const CLUSTER_SIZE: usize = 1024;

/// Size of one directory entry slot in bytes
pub const DIR_ENTRY_SIZE: usize = 32;

/// Cluster index assigned to the root directory region
pub const ROOT_DIR_CLUSTER: u32 = 2;

/// Sectors reserved between the directory region and the data region
pub const RESERVED_SECTORS: u32 = 31;

/// Status byte marking a never-used slot; a scan stops here
pub const ENTRY_FREE: u8 = 0x00;

/// Status byte marking a deleted slot, reusable by a later create
pub const ENTRY_DELETED: u8 = 0xE5;

/// Attribute bit set on volume-label entries
pub const ATTR_VOLUME: u8 = 0x08;

/// Attribute value marking a special (multi-part name) entry
pub const ATTR_SPECIAL: u8 = 0x0F;

/// Byte offset of the directory region within the image; the root
/// directory cluster resolves here under the biased cluster mapping
pub const DIR_REGION_START: u64 = 0;

/// Byte offset of the data region within the image
pub const DATA_REGION_START: u64 =
    (ROOT_DIR_CLUSTER + RESERVED_SECTORS) as u64 * SECTOR_SIZE as u64;

/// Number of entry slots the directory region can hold before it would
/// run into the data region
pub const DIR_CAPACITY: usize = ((DATA_REGION_START - DIR_REGION_START) as usize) / DIR_ENTRY_SIZE;

/// Convert a sector number to its absolute byte offset
#[inline]
pub fn sector_offset(sector: u32) -> u64 {
    sector as u64 * SECTOR_SIZE as u64
}

/// Convert a cluster index to its byte offset
///
/// Cluster indices are biased by the two reserved low-numbered units, so
/// the root directory cluster resolves to offset 0. Indices below the
/// root cluster have no location.
#[inline]
pub fn cluster_to_offset(cluster: u32) -> Option<u64> {
    cluster
        .checked_sub(ROOT_DIR_CLUSTER)
        .map(|c| c as u64 * CLUSTER_SIZE as u64)
}

/// Absolute byte offset of a directory slot
#[inline]
pub fn dir_slot_offset(index: usize) -> u64 {
    DIR_REGION_START + (index * DIR_ENTRY_SIZE) as u64
}

/// Absolute byte offset of the allocation unit owned by directory slot
/// `index`
#[inline]
pub fn data_unit_offset(index: usize) -> u64 {
    DATA_REGION_START + (index * CLUSTER_SIZE) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_offset() {
        assert_eq!(sector_offset(0), 0);
        assert_eq!(sector_offset(1), 512);
        assert_eq!(sector_offset(33), 16896);
    }

    #[test]
    fn test_root_dir_at_offset_zero() {
        assert_eq!(cluster_to_offset(ROOT_DIR_CLUSTER), Some(0));
        assert_eq!(DIR_REGION_START, 0);
    }

    #[test]
    fn test_cluster_to_offset() {
        assert_eq!(cluster_to_offset(3), Some(1024));
        assert_eq!(cluster_to_offset(10), Some(8 * 1024));
        assert_eq!(cluster_to_offset(1), None);
        assert_eq!(cluster_to_offset(0), None);
    }

    #[test]
    fn test_data_region_start() {
        // 33 sectors of 512 bytes sit before the first allocation unit
        assert_eq!(DATA_REGION_START, 33 * 512);
    }

    #[test]
    fn test_dir_capacity() {
        assert_eq!(DIR_CAPACITY, 528);
        // The last slot must end exactly where the data region begins
        assert_eq!(dir_slot_offset(DIR_CAPACITY), DATA_REGION_START);
    }

    #[test]
    fn test_slot_and_unit_offsets() {
        assert_eq!(dir_slot_offset(0), 0);
        assert_eq!(dir_slot_offset(4), 128);
        assert_eq!(data_unit_offset(0), DATA_REGION_START);
        assert_eq!(data_unit_offset(2), DATA_REGION_START + 2048);
    }
}
