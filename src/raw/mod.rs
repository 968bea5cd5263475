//! Raw structures that map directly onto the bytes of a 2G archive.
//!
//! In general, these structures are "dumb", meaning that they do the least amount of validity
//! checking. Decoding a header never looks at its signature or sizes; that is left to the
//! [Reader](crate::Reader), which has to tell a short stream apart from a damaged header:
//!
//! ```
//! use las2g::raw::Header;
//! let mut header = Header::new(0, 0);
//! header.file_signature = *b"LASG";
//! let decoded = Header::from_bytes(&header.to_bytes()).unwrap();
//! assert_eq!(*b"LASG", decoded.file_signature);
//! assert!(decoded.validate().is_err());
//! ```
//!
//! Users should generally prefer the non-raw [Record](crate::Record), [Header](crate::Header)
//! and [Point](crate::Point), which carry real-world coordinates and UTC times.

mod header;
mod point;
mod record;

pub use self::{header::Header, point::Point, record::Record};

/// The file magic number used for all las files.
pub const LASF: [u8; 4] = *b"LASF";

/// The size, in bytes, of a las 1.2 header without extensions.
pub const HEADER_SIZE: usize = 227;

/// The size, in bytes, of a point data format 1 record.
pub const POINT_SIZE: usize = 28;

/// The only point data format carried by 2G archives.
pub const POINT_DATA_FORMAT_ID: u8 = 1;

/// The scale factor written into every header, one micrometre per raw unit.
pub const DEFAULT_SCALE_FACTOR: f64 = 1e-6;

/// Raw units per metre when writing, the reciprocal of [DEFAULT_SCALE_FACTOR].
///
/// Coordinates are written as `metres * POINT_SCALE`, truncated toward zero.
pub const POINT_SCALE: f64 = 1e6;
