use crate::Transform;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The archive file could not be opened or created.
    #[error("could not open {}: {source}", .path.display())]
    Open {
        /// The path that was being opened.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The stream ended partway through a record header.
    ///
    /// A stream that ends exactly on a record boundary is not truncated.
    #[error("the stream ended {bytes} bytes into the header of record {record}")]
    TruncatedHeader {
        /// The zero-based index of the record in the archive.
        record: usize,
        /// The number of header bytes available.
        bytes: usize,
    },

    /// The stream ended before all of a record's points were read.
    #[error("record {record} declares {declared} points, but the stream ended after {read}")]
    Truncated {
        /// The zero-based index of the record in the archive.
        record: usize,
        /// The number of points declared by the record's header.
        declared: u32,
        /// The number of complete points read before the stream ended.
        read: u32,
    },

    /// A record declares more points than the reader allows.
    #[error("record {record} declares {declared} points, more than the limit of {limit}")]
    OversizedRecord {
        /// The zero-based index of the record in the archive.
        record: usize,
        /// The number of points declared by the record's header.
        declared: u32,
        /// The limit in force when the record was read.
        limit: u32,
    },

    /// The file signature was not "LASF".
    #[error("the file signature is not LASF: {0:?}")]
    InvalidFileSignature([u8; 4]),

    /// The header size field is not the size of a las 1.2 header.
    #[error("invalid header size: {0}")]
    InvalidHeaderSize(u16),

    /// The point data format id is not 1.
    #[error("unsupported point data format: {0}")]
    InvalidPointFormat(u8),

    /// The point data record length is not the length of a format 1 point.
    #[error("invalid point data record length: {0}")]
    InvalidPointDataRecordLength(u16),

    /// There were no records to encode.
    #[error("at least one record is required to write an archive")]
    EmptyInput,

    /// Writing to the sink failed.
    ///
    /// Bytes written before the failure stay written.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// Reading from the source failed, other than by reaching its end.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// [std::num::TryFromIntError]
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// A raw record's header declares a different number of points than it holds.
    #[error("the header declares {declared} points, but the record holds {found}")]
    PointCountMismatch {
        /// The number of points declared by the header.
        declared: u32,
        /// The number of points in the record.
        found: usize,
    },

    /// A byte buffer handed to a fixed-size decoder has the wrong length.
    #[error("expected a buffer of {expected} bytes, found {found}")]
    BufferSize {
        /// The exact size of the structure.
        expected: usize,
        /// The size of the buffer given.
        found: usize,
    },

    /// The value can't be represented as an i32 with the given transform.
    #[error("the transform {transform} cannot convert {n} to an i32")]
    InverseTransform {
        /// The float that was to be transformed.
        n: f64,
        /// The transform being used.
        transform: Transform,
    },
}

impl Error {
    /// Returns true if this error describes damaged archive content rather than a failing stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::Error;
    /// assert!(Error::InvalidFileSignature(*b"LASG").is_corruption());
    /// assert!(!Error::EmptyInput.is_corruption());
    /// ```
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::TruncatedHeader { .. }
                | Error::Truncated { .. }
                | Error::OversizedRecord { .. }
                | Error::InvalidFileSignature(_)
                | Error::InvalidHeaderSize(_)
                | Error::InvalidPointFormat(_)
                | Error::InvalidPointDataRecordLength(_)
        )
    }
}
