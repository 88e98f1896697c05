//! High-level directory listing over a decoded volume
//!
//! Combines the path table and directory records into per-directory file
//! listings, and reads file contents through the extent/length pairs the
//! records carry.

pub mod entry;

pub use entry::{EntryType, FileEntry};

use std::io::{Read, Seek};

use thiserror::Error;

use crate::directory::DirRecord;
use crate::error::IsoError;
use crate::image::DiscImage;
use crate::path_table::PathTableEntry;
use crate::volume::VolumeParameters;

/// Errors that can occur while browsing a volume
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error(transparent)]
    Iso(#[from] IsoError),

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),
}

/// Browser over one ISO 9660 volume
pub struct VolumeBrowser<R> {
    image: DiscImage<R>,
    params: VolumeParameters,
}

impl<R: Read + Seek> VolumeBrowser<R> {
    /// Read the volume descriptor and wrap the image for browsing
    pub fn new(mut image: DiscImage<R>) -> Result<Self, BrowseError> {
        let params = image.read_volume_descriptor()?;
        Ok(Self { image, params })
    }

    /// Volume parameters extracted from the descriptor
    pub fn params(&self) -> &VolumeParameters {
        &self.params
    }

    /// Volume label, if the descriptor carries one
    pub fn volume_name(&self) -> Option<&str> {
        if self.params.volume_identifier.is_empty() {
            None
        } else {
            Some(&self.params.volume_identifier)
        }
    }

    /// Every directory on the volume, root first, with resolved paths
    pub fn directories(&mut self) -> Result<Vec<PathTableEntry>, BrowseError> {
        Ok(self.image.read_path_table(&self.params)?)
    }

    /// List the files and subdirectories of one directory.
    ///
    /// Self and parent references are dropped, names cleaned, and the result
    /// sorted directories first, then by name.
    pub fn list_directory(
        &mut self,
        directory: &PathTableEntry,
    ) -> Result<Vec<FileEntry>, BrowseError> {
        let mut records = Vec::new();
        self.image
            .read_dir_entries(&self.params, directory, &mut records)?;

        let mut entries = Vec::new();
        for record in &records {
            if record.is_self() || record.is_parent() {
                continue;
            }

            let name = clean_name(record);
            let path = if directory.path.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", directory.path, name)
            };

            entries.push(if record.is_directory() {
                FileEntry::new_directory(name, path, record.location_of_extent as u64)
            } else {
                FileEntry::new_file(
                    name,
                    path,
                    record.data_length as u64,
                    record.location_of_extent as u64,
                )
            });
        }

        entries.sort_by(|a, b| match (a.entry_type, b.entry_type) {
            (EntryType::Directory, EntryType::File) => std::cmp::Ordering::Less,
            (EntryType::File, EntryType::Directory) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        log::debug!(
            "listed {:?}: {} entries",
            if directory.path.is_empty() { "/" } else { directory.path.as_str() },
            entries.len()
        );

        Ok(entries)
    }

    /// Read a file's entire contents
    pub fn read_file(&mut self, entry: &FileEntry) -> Result<Vec<u8>, BrowseError> {
        if !entry.is_file() {
            return Err(BrowseError::NotAFile(entry.path.clone()));
        }
        Ok(self
            .image
            .read_extent(&self.params, entry.location as u32, entry.size as usize)?)
    }
}

/// Clean a record identifier for display: strip the ";1" version suffix and,
/// for directories, any trailing dot.
fn clean_name(record: &DirRecord) -> String {
    let name = &record.file_identifier;

    let name = match name.rfind(';') {
        Some(idx) => &name[..idx],
        None => name.as_str(),
    };

    let name = if record.is_directory() {
        name.trim_end_matches('.')
    } else {
        name
    };

    name.to_string()
}
