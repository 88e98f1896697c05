//! Volume descriptor parsing
//!
//! The Primary Volume Descriptor lives at sector 16 and carries the volume
//! identification plus the logical block size and path table geometry that
//! every later read depends on.

use std::io::{Read, Seek};

use crate::error::IsoError;
use crate::fields::FieldReader;
use crate::sector::SectorStream;

/// Sector number of the first volume descriptor
pub const DESCRIPTOR_SECTOR: u64 = 16;

/// Standard identifier carried by every ISO 9660 volume descriptor
pub const STANDARD_IDENTIFIER: &str = "CD001";

/// Geometry and identification extracted from the Primary Volume Descriptor.
///
/// Produced once, then passed unchanged to the path table and directory
/// parsers.
#[derive(Debug, Clone)]
pub struct VolumeParameters {
    /// Logical block size in bytes, typically 2048
    pub block_size: u64,
    /// Size of the path table in bytes
    pub path_table_size: u32,
    /// Logical sector where the path table begins
    pub path_table_location: u32,
    /// System identifier (32 bytes on disc, space-padded)
    pub system_identifier: String,
    /// Volume identifier, i.e. the volume label
    pub volume_identifier: String,
}

/// Parse the volume descriptor the stream is positioned at.
///
/// The stream must sit at the start of sector 16. Mismatched little/big
/// endian encodings of the block size or path table size abort parsing;
/// the purely informational size fields only warn.
pub(crate) fn read_volume_descriptor<R: Read + Seek>(
    stream: &mut SectorStream<'_, R>,
) -> Result<VolumeParameters, IsoError> {
    let mut fields = FieldReader::new(stream);

    let _descriptor_type = fields.read_u8()?;
    let identifier = fields.read_ascii(5)?;
    let _version = fields.read_u8()?;
    fields.read_u8()?;

    if identifier != STANDARD_IDENTIFIER {
        return Err(IsoError::InvalidVolume(identifier));
    }

    let system_identifier = fields.read_ascii(32)?;
    let volume_identifier = fields.read_ascii(32)?;

    fields.skip(8)?; // unused

    let volume_space_size = fields.read_u32_le()?;
    let volume_space_size_be = fields.read_u32_be()?;
    if volume_space_size != volume_space_size_be {
        log::warn!(
            "volume space size encodings disagree: {} != {}",
            volume_space_size,
            volume_space_size_be
        );
    }

    fields.skip(32)?;

    let volume_set_size = fields.read_u16_le()?;
    let volume_set_size_be = fields.read_u16_be()?;
    if volume_set_size != volume_set_size_be {
        log::warn!(
            "volume set size encodings disagree: {} != {}",
            volume_set_size,
            volume_set_size_be
        );
    }

    let volume_sequence_number = fields.read_u16_le()?;
    let volume_sequence_number_be = fields.read_u16_be()?;
    if volume_sequence_number != volume_sequence_number_be {
        log::warn!(
            "volume sequence number encodings disagree: {} != {}",
            volume_sequence_number,
            volume_sequence_number_be
        );
    }

    // Sector arithmetic depends on these two, so a disagreement is fatal.
    let block_size = fields.read_u16_pair("logical block size")?;
    let path_table_size = fields.read_u32_pair("path table size")?;

    if block_size == 0 {
        return Err(IsoError::Malformed("zero logical block size".into()));
    }

    let path_table_location = fields.read_u32_le()?;
    let _optional_location = fields.read_u32_le()?;
    let _location_be = fields.read_u32_be()?;
    let _optional_location_be = fields.read_u32_be()?;

    log::debug!(
        "volume {:?}: block size {}, path table {} bytes at sector {}",
        volume_identifier,
        block_size,
        path_table_size,
        path_table_location
    );

    Ok(VolumeParameters {
        block_size: block_size as u64,
        path_table_size,
        path_table_location,
        system_identifier,
        volume_identifier,
    })
}
