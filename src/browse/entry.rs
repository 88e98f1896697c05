//! File entry structures for volume browsing

/// A single file or directory entry in a volume listing
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// File/directory name, version suffix stripped
    pub name: String,
    /// Root-relative path (e.g. "DATA/README.TXT")
    pub path: String,
    /// Entry type (file or directory)
    pub entry_type: EntryType,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Logical sector where the entry's data begins
    pub location: u64,
}

/// Type of volume entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

impl FileEntry {
    /// Create a new file entry
    pub fn new_file(name: String, path: String, size: u64, location: u64) -> Self {
        Self {
            name,
            path,
            entry_type: EntryType::File,
            size,
            location,
        }
    }

    /// Create a new directory entry
    pub fn new_directory(name: String, path: String, location: u64) -> Self {
        Self {
            name,
            path,
            entry_type: EntryType::Directory,
            size: 0,
            location,
        }
    }

    /// Check if this is a directory
    pub fn is_directory(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    /// Check if this is a file
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}
