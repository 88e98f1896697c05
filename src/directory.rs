//! Directory record parsing
//!
//! A directory occupies one or more whole logical blocks. Records never
//! straddle a block boundary; a zero length byte ends the records of the
//! current block, not necessarily the directory.

use std::io::{Read, Seek};

use crate::error::IsoError;
use crate::fields::FieldReader;
use crate::sector::SectorStream;

/// Flag bit: entry is a directory
const FLAG_DIRECTORY: u8 = 0x02;

/// Flag bit: identifier continues in the following record
const FLAG_NOT_FINAL: u8 = 0x80;

/// One file or subdirectory record inside a directory extent
#[derive(Debug, Clone)]
pub struct DirRecord {
    /// File or directory name as stored, version suffix included
    pub file_identifier: String,
    /// Length of the extended attribute record, carried but unused
    pub extended_attribute_record_length: u8,
    /// Logical sector where the entry's data begins
    pub location_of_extent: u32,
    /// Length of the entry's data in bytes
    pub data_length: u32,
    /// Recording timestamp, kept opaque
    pub date: [u8; 7],
    /// File flags
    pub flags: u8,
    pub file_unit_size: u8,
    pub interleave_gap: u8,
    pub volume_sequence_number: u16,
}

impl DirRecord {
    /// Entry is a directory
    pub fn is_directory(&self) -> bool {
        self.flags & FLAG_DIRECTORY != 0
    }

    /// Identifier continues in a following record. Exposed for callers;
    /// multi-record name reassembly is not performed here.
    pub fn is_not_final(&self) -> bool {
        self.flags & FLAG_NOT_FINAL != 0
    }

    /// The self-reference record that opens every directory
    pub fn is_self(&self) -> bool {
        self.file_identifier.is_empty() || self.file_identifier == "\0"
    }

    /// The parent-reference record
    pub fn is_parent(&self) -> bool {
        self.file_identifier == "\x01"
    }
}

/// Outcome of decoding one record slot within a block
pub(crate) enum RecordStep {
    /// A complete record
    Entry(DirRecord),
    /// Zero length byte: no more records in this block
    BlockEnd,
}

/// Decode the record at the reader's position.
///
/// The fixed part is 33 bytes; identifiers of even length carry one padding
/// byte so the record length stays even. Whatever remains up to the declared
/// record length is system-use data and is skipped unread.
pub(crate) fn next_record<S: Read>(fields: &mut FieldReader<S>) -> Result<RecordStep, IsoError> {
    let record_length = fields.read_u8()?;
    if record_length == 0 {
        return Ok(RecordStep::BlockEnd);
    }

    let extended_attribute_record_length = fields.read_u8()?;
    let location_of_extent = fields.read_u32_pair("extent location")?;
    let data_length = fields.read_u32_pair("data length")?;
    let date = fields.read_array::<7>()?;
    let flags = fields.read_u8()?;
    let file_unit_size = fields.read_u8()?;
    let interleave_gap = fields.read_u8()?;
    let volume_sequence_number = fields.read_u16_pair("volume sequence number")?;
    let identifier_length = fields.read_u8()?;
    let file_identifier = fields.read_ascii(identifier_length as usize)?;

    let mut consumed = 33 + identifier_length as usize;
    if identifier_length % 2 == 0 {
        fields.read_u8()?;
        consumed += 1;
    }

    if consumed < record_length as usize {
        fields.skip(record_length as usize - consumed)?;
    }

    Ok(RecordStep::Entry(DirRecord {
        file_identifier,
        extended_attribute_record_length,
        location_of_extent,
        data_length,
        date,
        flags,
        file_unit_size,
        interleave_gap,
        volume_sequence_number,
    }))
}

/// Result of one step of a directory walk
enum DirStep {
    Record(DirRecord),
    /// Crossed into the next block of a multi-block directory
    BlockBoundary,
    Done,
}

/// Walks every record of one directory extent, following block continuation
/// until the directory's declared byte length is consumed.
pub(crate) struct DirectoryWalker<'a, R> {
    fields: FieldReader<SectorStream<'a, R>>,
    location_of_extent: u32,
    block_current: u64,
    block_max: u64,
}

impl<'a, R: Read + Seek> DirectoryWalker<'a, R> {
    /// Consume the leading self-reference record, whose data length declares
    /// how many blocks the record list spans. The record is handed back so
    /// the caller can keep it; it receives no special treatment otherwise.
    pub fn new(
        stream: SectorStream<'a, R>,
        block_size: u64,
        location_of_extent: u32,
    ) -> Result<(Self, DirRecord), IsoError> {
        let mut fields = FieldReader::new(stream);

        let first = match next_record(&mut fields)? {
            RecordStep::Entry(entry) => entry,
            RecordStep::BlockEnd => {
                return Err(IsoError::Malformed(
                    "directory extent starts with an empty record".into(),
                ))
            }
        };
        let block_max = (first.data_length as u64 / block_size).saturating_sub(1);

        let walker = Self {
            fields,
            location_of_extent,
            block_current: 0,
            block_max,
        };
        Ok((walker, first))
    }

    fn step(&mut self) -> Result<DirStep, IsoError> {
        match next_record(&mut self.fields)? {
            RecordStep::Entry(entry) => Ok(DirStep::Record(entry)),
            RecordStep::BlockEnd => {
                if self.block_current < self.block_max {
                    self.block_current += 1;
                    self.fields
                        .get_mut()
                        .set_sector(self.location_of_extent as u64 + self.block_current);
                    Ok(DirStep::BlockBoundary)
                } else {
                    Ok(DirStep::Done)
                }
            }
        }
    }

    /// Next record, or `None` once the directory is fully consumed
    pub fn next_entry(&mut self) -> Result<Option<DirRecord>, IsoError> {
        loop {
            match self.step()? {
                DirStep::Record(entry) => return Ok(Some(entry)),
                DirStep::BlockBoundary => continue,
                DirStep::Done => return Ok(None),
            }
        }
    }
}
