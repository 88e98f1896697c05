//! Read-only ISO 9660 disc image decoding
//!
//! Decodes the volume descriptor, path table and directory records of an
//! ISO 9660 filesystem from either a plain `.iso` image (2048-byte logical
//! sectors) or a raw CD dump (2352-byte physical sectors with a 16-byte
//! header per sector).

pub mod browse;
pub mod directory;
pub mod error;
pub mod fields;
pub mod image;
pub mod layout;
pub mod path_table;
pub mod sector;
pub mod volume;

pub use directory::DirRecord;
pub use error::IsoError;
pub use image::DiscImage;
pub use layout::SectorLayout;
pub use path_table::PathTableEntry;
pub use volume::VolumeParameters;
