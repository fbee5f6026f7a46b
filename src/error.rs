use thiserror::Error;

/// Result type alias for disk image operations
pub type Result<T> = std::result::Result<T, FatError>;

/// Errors that can occur when working with FAT-style disk images
#[derive(Debug, Error)]
pub enum FatError {
    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Disk image could not be opened for the required access mode
    #[error("Cannot open image {path}: {source}")]
    ImageOpen {
        /// Path that failed to open
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A sector read returned fewer bytes than requested
    #[error("Short read at sector {sector}: got {got} of {wanted} bytes")]
    ShortRead {
        /// Sector number being read
        sector: u32,
        /// Bytes requested
        wanted: usize,
        /// Bytes actually read
        got: usize,
    },

    /// A sector write stored fewer bytes than requested
    #[error("Short write at sector {sector}: wrote {wrote} of {wanted} bytes")]
    ShortWrite {
        /// Sector number being written
        sector: u32,
        /// Bytes requested
        wanted: usize,
        /// Bytes actually written
        wrote: usize,
    },

    /// File not found in the directory region
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A live entry with the same name already exists
    #[error("File already exists: {0}")]
    FileExists(String),

    /// Directory region has no free slot left
    #[error("Directory full: no free entry slot available")]
    DirectoryFull,

    /// File content could not be read
    #[error("Content unreadable: {0}")]
    ContentUnreadable(String),

    /// File content could not be written
    #[error("Content unwritable: {0}")]
    ContentUnwritable(String),

    /// Invalid filename
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

impl FatError {
    /// Create an unreadable-content error
    pub fn unreadable<S: Into<String>>(message: S) -> Self {
        FatError::ContentUnreadable(message.into())
    }

    /// Create an unwritable-content error
    pub fn unwritable<S: Into<String>>(message: S) -> Self {
        FatError::ContentUnwritable(message.into())
    }

    /// Create an invalid-filename error
    pub fn invalid_filename<S: Into<String>>(message: S) -> Self {
        FatError::InvalidFilename(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FatError::ShortRead {
            sector: 7,
            wanted: 512,
            got: 100,
        };
        assert_eq!(
            err.to_string(),
            "Short read at sector 7: got 100 of 512 bytes"
        );
    }

    #[test]
    fn test_file_not_found_display() {
        let err = FatError::FileNotFound("HELLO.TXT".to_string());
        assert_eq!(err.to_string(), "File not found: HELLO.TXT");
    }

    #[test]
    fn test_unreadable_helper() {
        let err = FatError::unreadable("size 2000 exceeds the allocation unit");
        assert_eq!(
            err.to_string(),
            "Content unreadable: size 2000 exceeds the allocation unit"
        );
    }
}
