//! Read and write the las archives produced by 2G profiling sensors.
//!
//! A 2G archive is a plain concatenation of small las 1.2 files, each a 227 byte header followed
//! by its point data format 1 records. There is no container around them, so an archive ends
//! where the stream ends.
//!
//! # Reading
//!
//! Decode everything from anything that implements `Read`:
//!
//! ```
//! use std::io::Cursor;
//! let (records, status) = las2g::decode_archive(Cursor::new(Vec::new()));
//! assert!(records.is_empty());
//! assert_eq!(0, status.count());
//! ```
//!
//! Corrupt or truncated data never fails the whole call. Every record decoded before the damage
//! is returned and the `Status` says why decoding stopped:
//!
//! ```
//! use std::io::Cursor;
//! use las2g::{Point, Record};
//!
//! let record = Record::new(1_600_000_000_000_000, vec![Point::default(); 3]);
//! let mut bytes = Vec::new();
//! las2g::encode_archive(&mut bytes, &[record.clone(), record.clone()]).unwrap();
//! bytes.truncate(bytes.len() - 1);
//!
//! let (records, status) = las2g::decode_archive(Cursor::new(bytes));
//! assert_eq!(1, records.len());
//! assert!(status.is_partial());
//! ```
//!
//! Use a `Reader` to walk the records one at a time:
//!
//! ```
//! use std::io::Cursor;
//! use las2g::Reader;
//! let mut reader = Reader::new(Cursor::new(Vec::new()));
//! assert!(reader.read_record().unwrap().is_none());
//! ```
//!
//! # Writing
//!
//! ```
//! use las2g::{Point, Record, Writer};
//!
//! let point = Point { x: 1.5, y: 2., z: -0.25, intensity: 42, quality: 3, utc_time: 1_600_000_000_000_000 };
//! let record = Record::new(1_600_000_000_000_000, vec![point]);
//! let mut writer = Writer::new(Vec::new());
//! writer.write_record(&record).unwrap();
//! let bytes = writer.into_inner().unwrap();
//! assert_eq!(227 + 28, bytes.len());
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

pub mod gps_time;
pub mod raw;
pub mod reader;
pub mod writer;

mod error;
mod header;
mod point;
mod record;
mod transform;
mod vector;

pub use crate::{
    error::Error,
    gps_time::GpsTimeType,
    header::Header,
    point::Point,
    reader::{Reader, ReaderOptions, Status, decode_archive, read_archive},
    record::{Archive, Record},
    transform::Transform,
    vector::Vector,
    writer::{Writer, encode_archive, write_archive},
};

/// The default ceiling on the number of points a single record may declare.
///
/// Real 2G records stay far below this, so a larger count is taken as a sign of corruption. This
/// is a heuristic, not a limit of the las format, and can be changed with
/// [ReaderOptions::with_max_points_per_record].
pub const MAX_POINTS_PER_RECORD: u32 = 2048;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
