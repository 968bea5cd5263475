//! Write 2G archives.
//!
//! A `Writer` appends records to a sink, one after another:
//!
//! ```
//! use std::io::Cursor;
//! use las2g::{Point, Record, Writer};
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()));
//! writer.write_record(&Record::new(0, vec![Point::default(); 3])).unwrap();
//! let bytes = writer.into_inner().unwrap().into_inner();
//! assert_eq!(227 + 3 * 28, bytes.len());
//! ```
//!
//! Every record gets a freshly built header. Creation times and points are kept, but the scale
//! and offset a record was read with are not: points are always written in micrometres.

use crate::{Error, Record, Result, raw};
use log::{Level, log};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Writes the records of a 2G archive.
#[derive(Debug)]
pub struct Writer<W: Write> {
    write: W,
    records_written: usize,
}

impl Writer<BufWriter<File>> {
    /// Creates (or truncates) an archive file.
    ///
    /// The underlying `File` is wrapped in a `BufWriter` for performance reasons.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::Writer;
    /// let dir = tempfile::tempdir().unwrap();
    /// let writer = Writer::from_path(dir.path().join("archive.las")).unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Writer<BufWriter<File>>> {
        let path = path.as_ref();
        File::create(path)
            .map(|file| Writer::new(BufWriter::new(file)))
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl<W: Write> Writer<W> {
    /// Creates a new writer.
    ///
    /// Nothing is written until the first record.
    pub fn new(write: W) -> Writer<W> {
        Writer {
            write,
            records_written: 0,
        }
    }

    /// Writes a record.
    ///
    /// If a point can't be represented in the archive nothing is written for the record, and
    /// the writer can keep going.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las2g::{Point, Record, Writer};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()));
    /// let far_away = Point { x: 1e6, ..Default::default() };
    /// assert!(writer.write_record(&Record::new(0, vec![far_away])).is_err());
    /// assert_eq!(0, writer.records_written());
    /// ```
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let raw_record = record.to_raw()?;
        self.write_raw(&raw_record.header, &raw_record.points)
    }

    /// Writes a raw record.
    ///
    /// The header is rebuilt from the raw header's creation time and the number of points, so a
    /// raw record read from one archive can be copied into another unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las2g::{raw, Writer};
    /// let mut raw_record = raw::Record::new(0, vec![raw::Point::default()]).unwrap();
    /// raw_record.header.number_of_point_records = 42;
    /// let mut writer = Writer::new(Cursor::new(Vec::new()));
    /// writer.write_raw_record(&raw_record).unwrap();
    /// let bytes = writer.into_inner().unwrap().into_inner();
    /// assert_eq!(227 + 28, bytes.len());
    /// ```
    pub fn write_raw_record(&mut self, raw_record: &raw::Record) -> Result<()> {
        let header = raw::Header::new(
            raw_record.header.utc_time(),
            u32::try_from(raw_record.points.len())?,
        );
        self.write_raw(&header, &raw_record.points)
    }

    /// Returns the number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flushes and returns the underlying `Write`.
    pub fn into_inner(mut self) -> Result<W> {
        self.write.flush().map_err(Error::Write)?;
        Ok(self.write)
    }

    fn write_raw(&mut self, header: &raw::Header, points: &[raw::Point]) -> Result<()> {
        header.write_to(&mut self.write)?;
        for point in points {
            point.write_to(&mut self.write)?;
        }
        log!(
            Level::Debug,
            "wrote record {} with {} points",
            self.records_written,
            points.len()
        );
        self.records_written += 1;
        Ok(())
    }
}

/// Encodes every record into a `Write`, in order, and flushes it.
///
/// Returns [Error::EmptyInput] without writing anything if there are no records.
///
/// # Examples
///
/// ```
/// use las2g::{Error, Point, Record};
/// let mut bytes = Vec::new();
/// las2g::encode_archive(&mut bytes, &[Record::new(0, vec![Point::default()])]).unwrap();
/// assert_eq!(227 + 28, bytes.len());
/// assert!(matches!(las2g::encode_archive(&mut bytes, &[]), Err(Error::EmptyInput)));
/// ```
pub fn encode_archive<W: Write>(write: W, records: &[Record]) -> Result<()> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut writer = Writer::new(write);
    for record in records {
        writer.write_record(record)?;
    }
    let _ = writer.into_inner()?;
    Ok(())
}

/// Writes every record to a new archive file.
///
/// The file isn't created if there are no records.
pub fn write_archive<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<()> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }
    encode_archive(Writer::from_path(path)?.write, records)
}
