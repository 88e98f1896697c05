//! Path table parsing
//!
//! The path table is a flat, parent-indexed list of every directory on the
//! volume. Entries appear root first, so a well-formed entry's parent has
//! always been decoded already and full paths resolve in a single pass.

use crate::error::IsoError;
use crate::fields::FieldReader;

/// One directory in the volume's path table
#[derive(Debug, Clone)]
pub struct PathTableEntry {
    /// Directory name; empty for the root entry
    pub identifier: String,
    /// Root-relative slash-joined path
    pub path: String,
    /// 1-based index of the parent directory in the table
    pub parent_number: u16,
    /// Logical sector where this directory's records begin
    pub location_of_extent: u32,
    /// Length of the extended attribute record, carried but unused
    pub extended_attribute_record_length: u8,
}

/// Decode every entry of a path table from its raw bytes.
///
/// An entry whose parent does not precede it in the table is malformed; its
/// path degrades to the bare identifier instead of aborting the whole table.
pub(crate) fn decode_path_table(table: &[u8]) -> Result<Vec<PathTableEntry>, IsoError> {
    let mut fields = FieldReader::new(table);
    let mut entries: Vec<PathTableEntry> = Vec::new();

    while !fields.get_ref().is_empty() {
        let identifier_length = fields.read_u8()?;
        let extended_attribute_record_length = fields.read_u8()?;
        let location_of_extent = fields.read_u32_le()?;
        let parent_number = fields.read_u16_le()?;
        let identifier = fields.read_ascii(identifier_length as usize)?;

        if identifier_length % 2 != 0 {
            fields.read_u8()?; // records are padded to even length
        }

        // 1-based index of the entry being appended
        let index = entries.len() + 1;

        let path = if parent_number > 1 && (parent_number as usize) < index {
            format!(
                "{}/{}",
                entries[parent_number as usize - 1].path,
                identifier
            )
        } else {
            identifier.clone()
        };

        entries.push(PathTableEntry {
            identifier,
            path,
            parent_number,
            location_of_extent,
            extended_attribute_record_length,
        });
    }

    Ok(entries)
}
