//! Sector-granular byte stream over a disc image
//!
//! Hides the raw-vs-plain layout difference: the stream is positioned at a
//! logical sector and refills a block-sized buffer from the matching physical
//! offset as bytes are consumed.

use std::io::{self, Read, Seek, SeekFrom};

use crate::layout::SectorLayout;

/// Sequential reader positioned at a logical sector of a disc image
pub struct SectorStream<'a, R> {
    source: &'a mut R,
    layout: SectorLayout,
    block_size: u64,
    source_len: u64,
    buffer: Vec<u8>,
    position: usize,
    sector: u64,
}

impl<'a, R: Read + Seek> SectorStream<'a, R> {
    /// Create a stream positioned at `sector`. The buffer starts exhausted,
    /// so the first read triggers a refill.
    pub fn new(
        source: &'a mut R,
        layout: SectorLayout,
        block_size: u64,
        source_len: u64,
        sector: u64,
    ) -> Self {
        Self {
            source,
            layout,
            block_size,
            source_len,
            buffer: vec![0u8; block_size as usize],
            position: block_size as usize,
            sector,
        }
    }

    /// Reposition to another sector, discarding any buffered bytes
    pub fn set_sector(&mut self, sector: u64) {
        self.sector = sector;
        self.position = self.buffer.len();
    }

    /// Load the next sector once the buffer is exhausted.
    ///
    /// If the image ends mid-sector the tail of the buffer keeps its previous
    /// contents; callers must not read past the declared length of the
    /// structure they are decoding.
    fn refill(&mut self) -> io::Result<()> {
        if self.position < self.buffer.len() {
            return Ok(());
        }

        self.position = 0;
        let offset = self.layout.byte_offset(self.sector, self.block_size);
        self.sector += 1;

        self.source.seek(SeekFrom::Start(offset))?;
        let left = (self.buffer.len() as u64).min(self.source_len.saturating_sub(offset)) as usize;
        if left > 0 {
            self.source.read_exact(&mut self.buffer[..left])?;
        }
        Ok(())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.refill()?;
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(byte)
    }
}

impl<R: Read + Seek> Read for SectorStream<'_, R> {
    /// A single call returns at most the rest of the current sector buffer;
    /// callers needing an exact length must loop.
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        self.refill()?;
        let n = out.len().min(self.buffer.len() - self.position);
        out[..n].copy_from_slice(&self.buffer[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Image of `count` plain 4-byte blocks, block n filled with byte n
    fn plain_blocks(count: u8) -> Vec<u8> {
        let mut data = Vec::new();
        for n in 0..count {
            data.extend_from_slice(&[n; 4]);
        }
        data
    }

    #[test]
    fn test_sequential_refill() {
        let data = plain_blocks(3);
        let len = data.len() as u64;
        let mut cursor = Cursor::new(data);
        let mut stream = SectorStream::new(&mut cursor, SectorLayout::Plain, 4, len, 0);

        for expected in [0u8, 0, 0, 0, 1, 1, 1, 1, 2] {
            assert_eq!(stream.read_u8().unwrap(), expected);
        }
    }

    #[test]
    fn test_read_stops_at_buffer_boundary() {
        let data = plain_blocks(2);
        let len = data.len() as u64;
        let mut cursor = Cursor::new(data);
        let mut stream = SectorStream::new(&mut cursor, SectorLayout::Plain, 4, len, 0);

        // Consume two bytes of block 0, then ask for six: only the two
        // remaining buffered bytes come back.
        let mut two = [0u8; 2];
        assert_eq!(stream.read(&mut two).unwrap(), 2);
        let mut six = [0u8; 6];
        assert_eq!(stream.read(&mut six).unwrap(), 2);
        assert_eq!(&six[..2], &[0, 0]);
        assert_eq!(stream.read(&mut six).unwrap(), 4);
        assert_eq!(&six[..4], &[1, 1, 1, 1]);
    }

    #[test]
    fn test_set_sector_invalidates_buffer() {
        let data = plain_blocks(3);
        let len = data.len() as u64;
        let mut cursor = Cursor::new(data);
        let mut stream = SectorStream::new(&mut cursor, SectorLayout::Plain, 4, len, 0);

        assert_eq!(stream.read_u8().unwrap(), 0);
        stream.set_sector(2);
        assert_eq!(stream.read_u8().unwrap(), 2);
    }

    #[test]
    fn test_raw_layout_skips_headers() {
        // Two raw sectors of 20 bytes: 16-byte header, then a 4-byte payload.
        let mut data = Vec::new();
        for n in 0..2u8 {
            data.extend_from_slice(&[0xEE; 16]);
            data.extend_from_slice(&[n; 4]);
        }
        let len = data.len() as u64;
        let mut cursor = Cursor::new(data);

        let layout = SectorLayout::Raw { sector_size: 20 };
        let mut stream = SectorStream::new(&mut cursor, layout, 4, len, 0);

        let mut out = [0u8; 4];
        assert_eq!(stream.read(&mut out).unwrap(), 4);
        assert_eq!(out, [0, 0, 0, 0]);
        assert_eq!(stream.read(&mut out).unwrap(), 4);
        assert_eq!(out, [1, 1, 1, 1]);
    }

    #[test]
    fn test_short_source_leaves_stale_tail() {
        // One full block and a 2-byte tail.
        let mut data = plain_blocks(1);
        data.extend_from_slice(&[9, 9]);
        let len = data.len() as u64;
        let mut cursor = Cursor::new(data);
        let mut stream = SectorStream::new(&mut cursor, SectorLayout::Plain, 4, len, 0);

        let mut block = [0u8; 4];
        assert_eq!(stream.read(&mut block).unwrap(), 4);
        // Second block only has two real bytes; the rest of the buffer keeps
        // whatever was there before (block 0's contents).
        assert_eq!(stream.read(&mut block).unwrap(), 4);
        assert_eq!(&block[..2], &[9, 9]);
    }
}
