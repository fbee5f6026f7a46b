/*!
# fatmod

A Rust library for inspecting and modifying the flat root directory of
FAT-style disk image files.

## Features

- Direct sector-level I/O against the image file, with no in-memory
  filesystem model and no caching
- 32-byte directory entry codec with Free/Deleted/Special/Live slot
  classification
- Name lookup and free-slot scanning over the directory region
- Create, delete and fill-byte write operations with durable writes
- Idiomatic Rust API with comprehensive error handling

## Quick Start

```rust,no_run
use fatmod::FatFileSystem;

// Open an existing disk image
let mut fs = FatFileSystem::open("disk.img")?;

// List the root directory
for record in fs.list()? {
    println!("{}: {} bytes", record.display_name(), record.size);
}

// Create a file and fill it with 16 bytes of 0xAA
fs.create_file("NOTES.TXT")?;
let size = fs.write_file("NOTES.TXT", 0, 16, 0xAA)?;

// Read it back
let content = fs.read_file("NOTES.TXT")?;
assert_eq!(content.len(), size as usize);
# Ok::<(), fatmod::FatError>(())
```

## On-disk layout

Fixed geometry throughout: 512-byte sectors, 1024-byte allocation
units, 32-byte directory entries. The directory region starts at byte 0
and holds up to 528 slots; each slot owns the single allocation unit at
the matching index in the data region, which begins after 33 sectors.
Files never span allocation units.

There is no allocation-table walk, no sub-directory support and no long
filename support. Operations are single-threaded and synchronous, and
concurrent processes mutating the same image are not guarded against.

## Modules

- `layout`: geometry constants and offset arithmetic
- `image`: sector and byte-range I/O against the image file
- `entry`: directory entry codec and slot classification
- `directory`: directory region scanning
- `content`: file content reads and fill-byte writes
- `mutate`: in-place directory metadata updates
- `filesystem`: high-level facade tying the above together
- `error`: error types and Result alias
*/

#![warn(missing_docs)]

/// File content reads and fill-byte writes
pub mod content;
/// Directory region scanning
pub mod directory;
/// Directory entry codec and slot classification
pub mod entry;
/// Error types and Result alias
pub mod error;
/// High-level filesystem facade
pub mod filesystem;
/// Sector and byte-range I/O against the image file
pub mod image;
/// On-disk geometry constants and offset arithmetic
pub mod layout;
/// In-place directory metadata updates
pub mod mutate;

// Re-export common types
pub use content::{append_content, read_content, WriteMode};
pub use directory::{find_by_name, find_free_slot, live_entries, DirectoryScanner, FoundEntry};
pub use entry::{classify, decode, encode, parse_filename, DirEntry, EntryKind};
pub use error::{FatError, Result};
pub use filesystem::{FatFileSystem, FileRecord};
pub use image::FatImage;
pub use mutate::{create_entry, mark_deleted, update_size};
