//! Read 2G archives.
//!
//! An archive is read one record at a time: a header, then as many points as the header
//! declares, then the next header, until the stream ends. Ending cleanly on a record boundary is
//! the normal way for an archive to end.
//!
//! Damaged data stops the reader but doesn't lose what came before it. `read_all` returns every
//! complete record along with a [Status] explaining why it stopped:
//!
//! ```
//! use std::io::Cursor;
//! use las2g::{raw, Error, Reader, Status};
//!
//! let mut bytes = Vec::new();
//! raw::Record::new(0, vec![raw::Point::default()]).unwrap().write_to(&mut bytes).unwrap();
//! raw::Header::new(0, 5000).write_to(&mut bytes).unwrap();
//!
//! let (records, status) = Reader::new(Cursor::new(bytes)).read_all();
//! assert_eq!(1, records.len());
//! assert!(matches!(status.reason(), Some(Error::OversizedRecord { declared: 5000, .. })));
//! ```
//!
//! If you're reading from a file, wrap it in a `BufReader`, or use `Reader::from_path`, which
//! does it for you.

use crate::{
    Archive, Error, MAX_POINTS_PER_RECORD, Record, Result,
    raw::{self, HEADER_SIZE, POINT_SIZE},
};
use log::{Level, log};
use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::Path,
};

/// Options for [Reader].
///
/// # Examples
///
/// ```
/// use las2g::ReaderOptions;
/// let options = ReaderOptions::default().with_max_points_per_record(4096);
/// assert_eq!(4096, options.max_points_per_record());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    max_points_per_record: u32,
    validate_header: bool,
}

impl ReaderOptions {
    /// Changes the largest point count a record header may declare.
    ///
    /// A larger count is treated as corruption.
    pub fn with_max_points_per_record(mut self, max_points_per_record: u32) -> ReaderOptions {
        self.max_points_per_record = max_points_per_record;
        self
    }

    /// Turns header validation on or off.
    ///
    /// With validation, a header whose signature, header size, point format or point record length
    /// doesn't match the 2G layout is treated as corruption. Without it only the point count is
    /// checked.
    pub fn with_header_validation(mut self, validate_header: bool) -> ReaderOptions {
        self.validate_header = validate_header;
        self
    }

    /// Returns the largest point count a record header may declare.
    pub fn max_points_per_record(&self) -> u32 {
        self.max_points_per_record
    }

    /// Returns true if headers are validated.
    pub fn validates_header(&self) -> bool {
        self.validate_header
    }
}

impl Default for ReaderOptions {
    fn default() -> ReaderOptions {
        ReaderOptions {
            max_points_per_record: MAX_POINTS_PER_RECORD,
            validate_header: true,
        }
    }
}

/// How a complete read of an archive ended.
#[derive(Debug)]
pub enum Status {
    /// The stream ended on a record boundary, after this many records.
    Ok(usize),

    /// Damaged data, or a failing stream, stopped the read after this many complete records.
    PartialOk {
        /// The number of complete records read.
        count: usize,
        /// Why the read stopped.
        reason: Error,
    },
}

impl Status {
    /// Returns the number of complete records read.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::Status;
    /// assert_eq!(3, Status::Ok(3).count());
    /// ```
    pub fn count(&self) -> usize {
        match *self {
            Status::Ok(count) | Status::PartialOk { count, .. } => count,
        }
    }

    /// Returns true if the read stopped before the end of the stream.
    pub fn is_partial(&self) -> bool {
        matches!(self, Status::PartialOk { .. })
    }

    /// Returns why the read stopped early, if it did.
    pub fn reason(&self) -> Option<&Error> {
        match self {
            Status::Ok(_) => None,
            Status::PartialOk { reason, .. } => Some(reason),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    AwaitingHeader,
    EndOfStream,
    Corrupt,
    Failed,
}

/// Reads the records of a 2G archive.
#[derive(Debug)]
pub struct Reader<R: Read> {
    read: R,
    options: ReaderOptions,
    state: State,
    records_read: usize,
}

/// An iterator over the records in a [Reader].
///
/// This struct is generally created by calling `records()` on `Reader`.
#[derive(Debug)]
pub struct RecordIterator<'a, R: Read> {
    reader: &'a mut Reader<R>,
}

impl<R: Read> Iterator for RecordIterator<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

impl Reader<BufReader<File>> {
    /// Opens an archive file.
    ///
    /// The underlying `File` is wrapped in a `BufReader` for performance reasons.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::{Error, Reader};
    /// let result = Reader::from_path("does/not/exist.las");
    /// assert!(matches!(result, Err(Error::Open { .. })));
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<BufReader<File>>> {
        Reader::from_path_with_options(path, ReaderOptions::default())
    }

    /// Opens an archive file with custom options.
    pub fn from_path_with_options<P: AsRef<Path>>(
        path: P,
        options: ReaderOptions,
    ) -> Result<Reader<BufReader<File>>> {
        let path = path.as_ref();
        File::open(path)
            .map(|file| Reader::with_options(BufReader::new(file), options))
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl<R: Read> Reader<R> {
    /// Creates a new reader with default options.
    ///
    /// This does *not* wrap the `Read` in a `BufRead`, so if you're concerned about performance
    /// you should do that wrapping yourself (or use `from_path`).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las2g::Reader;
    /// let reader = Reader::new(Cursor::new(Vec::new()));
    /// ```
    pub fn new(read: R) -> Reader<R> {
        Reader::with_options(read, ReaderOptions::default())
    }

    /// Creates a new reader with custom options.
    pub fn with_options(read: R, options: ReaderOptions) -> Reader<R> {
        Reader {
            read,
            options,
            state: State::AwaitingHeader,
            records_read: 0,
        }
    }

    /// Reads the next raw record.
    ///
    /// Returns `Ok(None)` when the stream ends on a record boundary. Once an error has been
    /// returned, every later call returns `Ok(None)`, because the position in the stream can no
    /// longer be trusted.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las2g::{raw, Reader};
    /// let mut bytes = Vec::new();
    /// raw::Record::new(0, vec![raw::Point::default(); 2]).unwrap().write_to(&mut bytes).unwrap();
    /// let mut reader = Reader::new(Cursor::new(bytes));
    /// assert_eq!(2, reader.read_raw_record().unwrap().unwrap().points.len());
    /// assert!(reader.read_raw_record().unwrap().is_none());
    /// ```
    pub fn read_raw_record(&mut self) -> Result<Option<raw::Record>> {
        if self.state != State::AwaitingHeader {
            return Ok(None);
        }
        match self.next_raw_record() {
            Ok(Some(raw_record)) => {
                log!(
                    Level::Debug,
                    "read record {} with {} points",
                    self.records_read,
                    raw_record.points.len()
                );
                self.records_read += 1;
                Ok(Some(raw_record))
            }
            Ok(None) => {
                self.state = State::EndOfStream;
                Ok(None)
            }
            Err(err) => {
                self.state = if err.is_corruption() {
                    State::Corrupt
                } else {
                    State::Failed
                };
                Err(err)
            }
        }
    }

    /// Reads the next record.
    ///
    /// The points are converted with the scale and offset of the record's own header.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las2g::Reader;
    /// let mut reader = Reader::new(Cursor::new(Vec::new()));
    /// assert!(reader.read_record().unwrap().is_none());
    /// ```
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        self.read_raw_record()
            .map(|raw_record| raw_record.as_ref().map(Record::from_raw))
    }

    /// Returns an iterator over the remaining records.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las2g::Reader;
    /// let mut reader = Reader::new(Cursor::new(Vec::new()));
    /// let records = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
    /// assert!(records.is_empty());
    /// ```
    pub fn records(&mut self) -> RecordIterator<'_, R> {
        RecordIterator { reader: self }
    }

    /// Reads every remaining record.
    ///
    /// Reading never fails outright. Damaged data, or a stream that fails partway, ends the read
    /// with [Status::PartialOk], keeping every complete record read before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las2g::Reader;
    /// let (records, status) = Reader::new(Cursor::new(Vec::new())).read_all();
    /// assert!(records.is_empty());
    /// assert!(!status.is_partial());
    /// ```
    pub fn read_all(mut self) -> (Archive, Status) {
        let mut records = Vec::new();
        let status = loop {
            match self.read_record() {
                Ok(Some(record)) => records.push(record),
                Ok(None) => break Status::Ok(records.len()),
                Err(err) => {
                    log!(
                        Level::Warn,
                        "stopped reading after {} records: {}",
                        records.len(),
                        err
                    );
                    break Status::PartialOk {
                        count: records.len(),
                        reason: err,
                    };
                }
            }
        };
        records.shrink_to_fit();
        (records, status)
    }

    /// Returns the number of complete records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Returns this reader's options.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Consumes this reader, returning the underlying `Read`.
    pub fn into_inner(self) -> R {
        self.read
    }

    fn next_raw_record(&mut self) -> Result<Option<raw::Record>> {
        let mut bytes = [0; HEADER_SIZE];
        match read_block(&mut self.read, &mut bytes)? {
            0 => return Ok(None),
            HEADER_SIZE => {}
            n => {
                return Err(Error::TruncatedHeader {
                    record: self.records_read,
                    bytes: n,
                });
            }
        }
        let header = raw::Header::from_bytes(&bytes)?;
        if self.options.validate_header {
            header.validate()?;
        }

        let declared = header.number_of_point_records;
        if declared > self.options.max_points_per_record {
            return Err(Error::OversizedRecord {
                record: self.records_read,
                declared,
                limit: self.options.max_points_per_record,
            });
        }

        let mut points = Vec::with_capacity(declared.min(MAX_POINTS_PER_RECORD) as usize);
        let mut bytes = [0; POINT_SIZE];
        for read in 0..declared {
            if read_block(&mut self.read, &mut bytes)? < POINT_SIZE {
                return Err(Error::Truncated {
                    record: self.records_read,
                    declared,
                    read,
                });
            }
            points.push(raw::Point::from_bytes(&bytes)?);
        }
        Ok(Some(raw::Record { header, points }))
    }
}

/// Decodes every record of an archive from a `Read`.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// let (records, status) = las2g::decode_archive(Cursor::new(Vec::new()));
/// assert_eq!(0, status.count());
/// ```
pub fn decode_archive<R: Read>(read: R) -> (Archive, Status) {
    Reader::new(read).read_all()
}

/// Reads every record of an archive file.
///
/// Returns [Error::Open] if the file can't be opened. Once it is open, the read ends as
/// [Reader::read_all] does.
pub fn read_archive<P: AsRef<Path>>(path: P) -> Result<(Archive, Status)> {
    Ok(Reader::from_path(path)?.read_all())
}

/// Fills `buf` from `read`, stopping early only at the end of the stream.
///
/// Returns the number of bytes read.
fn read_block<R: Read>(read: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match read.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn archive(counts: &[u32]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (i, &count) in counts.iter().enumerate() {
            let points = (0..count)
                .map(|n| raw::Point {
                    x: n as i32,
                    ..Default::default()
                })
                .collect();
            raw::Record::new(i as u64, points)
                .unwrap()
                .write_to(&mut bytes)
                .unwrap();
        }
        bytes
    }

    #[test]
    fn empty_stream() {
        let mut reader = Reader::new(Cursor::new(Vec::new()));
        assert!(reader.read_raw_record().unwrap().is_none());
        assert_eq!(0, reader.records_read());
    }

    #[test]
    fn records_in_order() {
        let mut reader = Reader::new(Cursor::new(archive(&[2, 0, 3])));
        let counts = reader
            .records()
            .map(|record| record.unwrap().number_of_points())
            .collect::<Vec<_>>();
        assert_eq!(vec![2, 0, 3], counts);
        assert_eq!(3, reader.records_read());
    }

    #[test]
    fn stops_after_corruption() {
        let mut bytes = archive(&[1]);
        bytes.extend_from_slice(&[0; 10]);
        bytes.extend(archive(&[1]));
        let mut reader = Reader::new(Cursor::new(bytes));
        assert!(reader.read_record().unwrap().is_some());
        assert!(reader.read_record().is_err());
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn truncated_points() {
        let mut bytes = archive(&[4]);
        bytes.truncate(HEADER_SIZE + 2 * POINT_SIZE + 5);
        let err = Reader::new(Cursor::new(bytes)).read_record().unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated {
                record: 0,
                declared: 4,
                read: 2
            }
        ));
    }

    #[test]
    fn truncated_header() {
        let mut bytes = archive(&[1, 1]);
        let _ = bytes.pop();
        let (records, status) = Reader::new(Cursor::new(bytes)).read_all();
        assert_eq!(1, records.len());
        assert!(matches!(
            status.reason(),
            Some(Error::Truncated { record: 1, .. })
        ));

        let mut bytes = archive(&[1, 1]);
        bytes.truncate(HEADER_SIZE + POINT_SIZE + 100);
        let (records, status) = Reader::new(Cursor::new(bytes)).read_all();
        assert_eq!(1, records.len());
        assert!(matches!(
            status.reason(),
            Some(Error::TruncatedHeader {
                record: 1,
                bytes: 100
            })
        ));
    }

    #[test]
    fn oversized_record() {
        let mut bytes = archive(&[1]);
        raw::Header::new(0, MAX_POINTS_PER_RECORD + 1)
            .write_to(&mut bytes)
            .unwrap();
        let (records, status) = decode_archive(Cursor::new(bytes));
        assert_eq!(1, records.len());
        assert!(matches!(
            status,
            Status::PartialOk {
                count: 1,
                reason: Error::OversizedRecord {
                    record: 1,
                    declared: 2049,
                    limit: 2048
                }
            }
        ));
    }

    #[test]
    fn custom_limit() {
        let options = ReaderOptions::default().with_max_points_per_record(2);
        let (records, status) = Reader::with_options(Cursor::new(archive(&[2, 3])), options)
            .read_all();
        assert_eq!(1, records.len());
        assert!(status.is_partial());
    }

    #[test]
    fn invalid_signature() {
        let mut bytes = archive(&[1]);
        bytes[0] = b'X';
        let (records, status) = decode_archive(Cursor::new(bytes.clone()));
        assert!(records.is_empty());
        assert!(matches!(
            status.reason(),
            Some(Error::InvalidFileSignature(_))
        ));

        let options = ReaderOptions::default().with_header_validation(false);
        let (records, status) = Reader::with_options(Cursor::new(bytes), options)
            .read_all();
        assert_eq!(1, records.len());
        assert!(!status.is_partial());
    }

    struct FailsAfter {
        bytes: Cursor<Vec<u8>>,
    }

    impl Read for FailsAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.bytes.read(buf)? {
                0 => Err(io::Error::other("medium error")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn stream_failure_keeps_complete_records() {
        let mut bytes = archive(&[2, 1]);
        bytes.extend_from_slice(&archive(&[1])[..10]);
        let reader = Reader::new(FailsAfter {
            bytes: Cursor::new(bytes),
        });
        let (records, status) = reader.read_all();
        assert_eq!(2, records.len());
        assert!(matches!(
            status,
            Status::PartialOk {
                count: 2,
                reason: Error::Io(_)
            }
        ));
    }

    #[test]
    fn stream_failure_from_read_record() {
        let mut reader = Reader::new(FailsAfter {
            bytes: Cursor::new(archive(&[1])),
        });
        assert!(reader.read_record().unwrap().is_some());
        assert!(matches!(reader.read_record(), Err(Error::Io(_))));
        assert!(reader.read_record().unwrap().is_none());
    }

    struct InterruptedOnce {
        interrupted: bool,
        bytes: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(ErrorKind::Interrupted.into());
            }
            self.bytes.read(buf)
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let reader = Reader::new(InterruptedOnce {
            interrupted: false,
            bytes: Cursor::new(archive(&[2])),
        });
        let (records, status) = reader.read_all();
        assert_eq!(1, records.len());
        assert!(matches!(status, Status::Ok(1)));
    }

    struct OneByteAtATime(Cursor<Vec<u8>>);

    impl Read for OneByteAtATime {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(1);
            self.0.read(&mut buf[..n])
        }
    }

    #[test]
    fn short_reads() {
        let reader = Reader::new(OneByteAtATime(Cursor::new(archive(&[3, 1]))));
        let (records, status) = reader.read_all();
        assert_eq!(2, records.len());
        assert!(!status.is_partial());
    }
}
