/// Directory entry codec
///
/// Converts between the fixed 32-byte on-disk slot encoding and the
/// in-memory entry record, and classifies raw slots by their status and
/// attribute bytes.
use crate::error::{FatError, Result};
use crate::layout::{ATTR_SPECIAL, DIR_ENTRY_SIZE, ENTRY_DELETED, ENTRY_FREE};

/// Classification of a 32-byte directory slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Never used; marks the end of the valid directory and stops a scan
    Free,
    /// Previously used, reusable by a later create
    Deleted,
    /// Reserved multi-part name entry, skipped by scans
    Special,
    /// A valid file entry
    Live,
}

/// In-memory form of a directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Trimmed file name, up to 8 characters
    pub name: String,
    /// Trimmed extension, up to 3 characters
    pub ext: String,
    /// Stored size field, little-endian on disk
    pub size: u32,
}

impl DirEntry {
    /// Entry name in NAME.EXT form
    pub fn display_name(&self) -> String {
        if self.ext.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.ext)
        }
    }
}

/// Classify a raw slot from its status byte and attribute byte
///
/// Pure function of byte 0 and byte 11; the status sentinels take
/// precedence over the attribute marker.
pub fn classify(raw: &[u8; DIR_ENTRY_SIZE]) -> EntryKind {
    match raw[0] {
        ENTRY_FREE => EntryKind::Free,
        ENTRY_DELETED => EntryKind::Deleted,
        _ if raw[11] == ATTR_SPECIAL => EntryKind::Special,
        _ => EntryKind::Live,
    }
}

/// Decode a raw slot into a directory entry
///
/// The name bytes are copied out as stored, whatever the slot's status;
/// status is read from the raw first byte, never from the decoded
/// string.
pub fn decode(raw: &[u8; DIR_ENTRY_SIZE]) -> DirEntry {
    let name = String::from_utf8_lossy(&raw[0..8])
        .trim_end_matches([' ', '\0'])
        .to_string();
    let ext = String::from_utf8_lossy(&raw[8..11])
        .trim_end_matches([' ', '\0'])
        .to_string();
    let size = u32::from_le_bytes([raw[28], raw[29], raw[30], raw[31]]);
    DirEntry { name, ext, size }
}

/// Encode a directory entry into its on-disk form
///
/// Name and extension are space-padded; bytes this system does not
/// manage are zero-filled.
pub fn encode(entry: &DirEntry) -> [u8; DIR_ENTRY_SIZE] {
    let mut raw = [0u8; DIR_ENTRY_SIZE];
    raw[0..8].fill(b' ');
    raw[8..11].fill(b' ');
    for (i, b) in entry.name.bytes().take(8).enumerate() {
        raw[i] = b;
    }
    for (i, b) in entry.ext.bytes().take(3).enumerate() {
        raw[8 + i] = b;
    }
    raw[28..32].copy_from_slice(&entry.size.to_le_bytes());
    raw
}

/// Validate a user-supplied filename and split it into name and
/// extension
///
/// Accepts `NAME` or `NAME.EXT` with 1-8 name characters and up to 3
/// extension characters, printable ASCII only. The sentinel byte values
/// can never appear because they are not printable ASCII.
pub fn parse_filename(input: &str) -> Result<(String, String)> {
    let (name, ext) = match input.split_once('.') {
        Some((n, e)) => (n, e),
        None => (input, ""),
    };
    if name.is_empty() || name.len() > 8 {
        return Err(FatError::invalid_filename(format!(
            "{input}: name must be 1-8 characters"
        )));
    }
    if ext.len() > 3 {
        return Err(FatError::invalid_filename(format!(
            "{input}: extension must be at most 3 characters"
        )));
    }
    if name
        .chars()
        .chain(ext.chars())
        .any(|c| !c.is_ascii_graphic() || c == '.')
    {
        return Err(FatError::invalid_filename(format!(
            "{input}: only printable ASCII characters are allowed"
        )));
    }
    Ok((name.to_string(), ext.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw_with(first: u8, attr: u8) -> [u8; DIR_ENTRY_SIZE] {
        let mut raw = [0u8; DIR_ENTRY_SIZE];
        raw[0] = first;
        raw[11] = attr;
        raw
    }

    #[test]
    fn test_classify_free() {
        assert_eq!(classify(&raw_with(0x00, 0x00)), EntryKind::Free);
        // Status sentinel wins over the attribute marker
        assert_eq!(classify(&raw_with(0x00, 0x0F)), EntryKind::Free);
    }

    #[test]
    fn test_classify_deleted() {
        assert_eq!(classify(&raw_with(0xE5, 0x00)), EntryKind::Deleted);
        assert_eq!(classify(&raw_with(0xE5, 0x0F)), EntryKind::Deleted);
    }

    #[test]
    fn test_classify_special() {
        assert_eq!(classify(&raw_with(b'A', 0x0F)), EntryKind::Special);
    }

    #[test]
    fn test_classify_live() {
        assert_eq!(classify(&raw_with(b'A', 0x00)), EntryKind::Live);
        assert_eq!(classify(&raw_with(b'A', 0x08)), EntryKind::Live);
    }

    #[test]
    fn test_decode_entry() {
        let mut raw = [0u8; DIR_ENTRY_SIZE];
        raw[0..8].copy_from_slice(b"TESTFILE");
        raw[8..11].copy_from_slice(b"TXT");
        raw[28..32].copy_from_slice(&1000u32.to_le_bytes());

        let entry = decode(&raw);
        assert_eq!(entry.name, "TESTFILE");
        assert_eq!(entry.ext, "TXT");
        assert_eq!(entry.size, 1000);
        assert_eq!(entry.display_name(), "TESTFILE.TXT");
    }

    #[test]
    fn test_decode_space_padded() {
        let mut raw = [b' '; DIR_ENTRY_SIZE];
        raw[0..5].copy_from_slice(b"HELLO");
        raw[11] = 0;
        raw[12..].fill(0);

        let entry = decode(&raw);
        assert_eq!(entry.name, "HELLO");
        assert_eq!(entry.ext, "");
        assert_eq!(entry.display_name(), "HELLO");
    }

    #[test]
    fn test_decode_keeps_name_of_deleted_slot() {
        // The codec copies the stored bytes out even when the first byte
        // is a status sentinel; classification is a separate question.
        let mut raw = [b' '; DIR_ENTRY_SIZE];
        raw[0..5].copy_from_slice(b"HELLO");
        raw[0] = ENTRY_DELETED;
        raw[28..32].fill(0);

        assert_eq!(classify(&raw), EntryKind::Deleted);
        let entry = decode(&raw);
        assert!(entry.name.ends_with("ELLO"));
        assert_eq!(entry.name.chars().count(), 5);
    }

    #[test]
    fn test_encode_pads_and_zero_fills() {
        let entry = DirEntry {
            name: "HI".to_string(),
            ext: "C".to_string(),
            size: 5,
        };
        let raw = encode(&entry);
        assert_eq!(&raw[0..8], b"HI      ");
        assert_eq!(&raw[8..11], b"C  ");
        assert!(raw[11..28].iter().all(|&b| b == 0));
        assert_eq!(&raw[28..32], &5u32.to_le_bytes());
    }

    #[test]
    fn test_parse_filename() {
        assert_eq!(
            parse_filename("NOTES.TXT").unwrap(),
            ("NOTES".to_string(), "TXT".to_string())
        );
        assert_eq!(
            parse_filename("README").unwrap(),
            ("README".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_filename_rejects() {
        assert!(parse_filename("").is_err());
        assert!(parse_filename("TOOLONGNAME").is_err());
        assert!(parse_filename("A.LONG").is_err());
        assert!(parse_filename("BAD NAME").is_err());
        assert!(parse_filename("A.B.C").is_err());
    }

    proptest! {
        #[test]
        fn classification_is_exhaustive(first in any::<u8>(), attr in any::<u8>()) {
            let kind = classify(&raw_with(first, attr));
            let expected = match first {
                0x00 => EntryKind::Free,
                0xE5 => EntryKind::Deleted,
                _ if attr == 0x0F => EntryKind::Special,
                _ => EntryKind::Live,
            };
            prop_assert_eq!(kind, expected);
        }

        #[test]
        fn decode_accepts_any_bytes(raw in any::<[u8; DIR_ENTRY_SIZE]>()) {
            let entry = decode(&raw);
            prop_assert!(entry.name.chars().count() <= 8);
            prop_assert!(entry.ext.chars().count() <= 3);
        }

        #[test]
        fn round_trip(
            name in "[A-Z][A-Z0-9]{0,7}",
            ext in "[A-Z0-9]{0,3}",
            size in any::<u32>(),
        ) {
            let entry = DirEntry { name, ext, size };
            let decoded = decode(&encode(&entry));
            prop_assert_eq!(decoded, entry);
        }
    }
}
