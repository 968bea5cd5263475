//! Per-record metadata in real-world units.

use crate::{Transform, Vector, raw};

/// The metadata of one record that survives a write.
///
/// Everything else in a [raw::Header] is fixed by the 2G format, and is regenerated whenever a
/// record is written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
    /// The creation time of the record, in UTC microseconds since the Unix epoch.
    pub utc_time: u64,

    /// The scale and offset for each axis that were used to read the points.
    ///
    /// Writing always uses the default transforms, one micrometre per unit with no offset.
    pub transforms: Vector<Transform>,
}

impl Header {
    /// Creates a header for a record created at `utc_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::{Header, Transform};
    /// let header = Header::new(1_600_000_000_000_000);
    /// assert_eq!(Transform::default(), header.transforms.x);
    /// ```
    pub fn new(utc_time: u64) -> Header {
        Header {
            utc_time,
            transforms: Vector::splat(Transform::default()),
        }
    }
}

impl Default for Header {
    fn default() -> Header {
        Header::new(0)
    }
}

impl From<&raw::Header> for Header {
    fn from(raw_header: &raw::Header) -> Header {
        Header {
            utc_time: raw_header.utc_time(),
            transforms: raw_header.transforms(),
        }
    }
}
