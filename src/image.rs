//! Disc image access
//!
//! Ties the sector layout, volume descriptor, path table and directory
//! parsers together over one random-access byte source.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::directory::{DirRecord, DirectoryWalker};
use crate::error::IsoError;
use crate::fields::FieldReader;
use crate::layout::{SectorLayout, DEFAULT_BLOCK_SIZE};
use crate::path_table::{decode_path_table, PathTableEntry};
use crate::sector::SectorStream;
use crate::volume::{read_volume_descriptor, VolumeParameters, DESCRIPTOR_SECTOR};

/// Read-only view of an ISO 9660 disc image
pub struct DiscImage<R> {
    source: R,
    layout: SectorLayout,
    source_len: u64,
}

impl DiscImage<BufReader<File>> {
    /// Open an image file, guessing the sector layout from its extension
    pub fn open(path: &Path) -> Result<Self, IsoError> {
        let layout = SectorLayout::from_path(path).ok_or_else(|| {
            IsoError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            )
        })?;
        Self::open_with_layout(path, layout)
    }

    /// Open an image file with an explicit sector layout
    pub fn open_with_layout(path: &Path, layout: SectorLayout) -> Result<Self, IsoError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file), layout)
    }
}

impl<R: Read + Seek> DiscImage<R> {
    /// Wrap an already-open byte source
    pub fn new(mut source: R, layout: SectorLayout) -> Result<Self, IsoError> {
        let source_len = source.seek(SeekFrom::End(0))?;
        Ok(Self {
            source,
            layout,
            source_len,
        })
    }

    /// Stream positioned at a logical sector
    fn stream_at(&mut self, sector: u64, block_size: u64) -> SectorStream<'_, R> {
        SectorStream::new(
            &mut self.source,
            self.layout,
            block_size,
            self.source_len,
            sector,
        )
    }

    /// Parse the Primary Volume Descriptor at sector 16.
    pub fn read_volume_descriptor(&mut self) -> Result<VolumeParameters, IsoError> {
        let mut stream = self.stream_at(DESCRIPTOR_SECTOR, DEFAULT_BLOCK_SIZE);
        read_volume_descriptor(&mut stream)
    }

    /// Read the whole path table and resolve each entry's path.
    pub fn read_path_table(
        &mut self,
        params: &VolumeParameters,
    ) -> Result<Vec<PathTableEntry>, IsoError> {
        let stream = self.stream_at(params.path_table_location as u64, params.block_size);
        // The table is read as one fixed-size slice up front; decoding then
        // runs against the in-memory buffer until it is exhausted.
        let table = FieldReader::new(stream).read_bytes(params.path_table_size as usize)?;
        decode_path_table(&table)
    }

    /// Append every record of one directory's extent to `out`.
    ///
    /// The self and parent reference records come through like any other;
    /// filtering them is the caller's business.
    pub fn read_dir_entries(
        &mut self,
        params: &VolumeParameters,
        directory: &PathTableEntry,
        out: &mut Vec<DirRecord>,
    ) -> Result<(), IsoError> {
        let stream = self.stream_at(directory.location_of_extent as u64, params.block_size);
        let (mut walker, first) =
            DirectoryWalker::new(stream, params.block_size, directory.location_of_extent)?;
        out.push(first);
        while let Some(entry) = walker.next_entry()? {
            out.push(entry);
        }
        Ok(())
    }

    /// Read `length` bytes starting at a logical sector — the extent read
    /// that file content access performs with a directory record's
    /// `(location_of_extent, data_length)` pair.
    pub fn read_extent(
        &mut self,
        params: &VolumeParameters,
        location: u32,
        length: usize,
    ) -> Result<Vec<u8>, IsoError> {
        let stream = self.stream_at(location as u64, params.block_size);
        FieldReader::new(stream).read_bytes(length)
    }
}
