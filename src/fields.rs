//! Structured field decoding
//!
//! Cursor-oriented reads of the fixed-width integers, padded ASCII strings
//! and raw byte runs that make up ISO 9660 on-disk structures. Works over any
//! `Read` source (a sector stream or an in-memory buffer) and does no
//! buffering of its own.

use std::io::Read;

use crate::error::IsoError;

/// Decoder for fixed-width fields over a byte source
pub struct FieldReader<R> {
    source: R,
}

impl<R: Read> FieldReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Borrow the underlying source
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Borrow the underlying source mutably
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Fill `buf` completely, looping over short reads
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), IsoError> {
        let mut done = 0;
        while done < buf.len() {
            let n = self.source.read(&mut buf[done..])?;
            if n == 0 {
                return Err(IsoError::Truncated {
                    needed: buf.len() - done,
                });
            }
            done += n;
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, IsoError> {
        let mut bytes = [0u8; 1];
        self.fill(&mut bytes)?;
        Ok(bytes[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, IsoError> {
        let mut bytes = [0u8; 2];
        self.fill(&mut bytes)?;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_u16_be(&mut self) -> Result<u16, IsoError> {
        let mut bytes = [0u8; 2];
        self.fill(&mut bytes)?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, IsoError> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_u32_be(&mut self) -> Result<u32, IsoError> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Read a 16-bit value stored twice (little-endian then big-endian) and
    /// require both encodings to agree.
    pub fn read_u16_pair(&mut self, field: &'static str) -> Result<u16, IsoError> {
        let le = self.read_u16_le()?;
        let be = self.read_u16_be()?;
        if le != be {
            return Err(IsoError::EncodingMismatch {
                field,
                le: le as u64,
                be: be as u64,
            });
        }
        Ok(le)
    }

    /// Read a 32-bit value stored twice (little-endian then big-endian) and
    /// require both encodings to agree.
    pub fn read_u32_pair(&mut self, field: &'static str) -> Result<u32, IsoError> {
        let le = self.read_u32_le()?;
        let be = self.read_u32_be()?;
        if le != be {
            return Err(IsoError::EncodingMismatch {
                field,
                le: le as u64,
                be: be as u64,
            });
        }
        Ok(le)
    }

    /// Read `len` bytes as ASCII, trimming trailing spaces and NULs
    pub fn read_ascii(&mut self, len: usize) -> Result<String, IsoError> {
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(&bytes)
            .trim_end_matches(|c: char| c == ' ' || c == '\0')
            .to_string())
    }

    /// Read exactly `len` raw bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, IsoError> {
        let mut bytes = vec![0u8; len];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }

    /// Read a fixed-size byte array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], IsoError> {
        let mut bytes = [0u8; N];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }

    /// Discard `len` bytes
    pub fn skip(&mut self, len: usize) -> Result<(), IsoError> {
        let mut scratch = [0u8; 64];
        let mut remaining = len;
        while remaining > 0 {
            let take = remaining.min(scratch.len());
            self.fill(&mut scratch[..take])?;
            remaining -= take;
        }
        Ok(())
    }
}
