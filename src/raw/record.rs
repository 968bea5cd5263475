use super::{Header, Point};
use crate::{Error, Result};
use std::io::Write;

/// One raw record of an archive: a header and the points it declares.
///
/// A record read from an archive always holds exactly `header.number_of_point_records` points.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The record header.
    pub header: Header,
    /// The point records that follow the header.
    pub points: Vec<Point>,
}

impl Record {
    /// Creates a record with a fresh header for the points.
    ///
    /// The header's point count is taken from `points`, so the two can't disagree.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::{Point, Record};
    /// let record = Record::new(0, vec![Point::default(); 2]).unwrap();
    /// assert_eq!(2, record.header.number_of_point_records);
    /// ```
    pub fn new(utc_time: u64, points: Vec<Point>) -> Result<Record> {
        let number_of_points = u32::try_from(points.len())?;
        Ok(Record {
            header: Header::new(utc_time, number_of_points),
            points,
        })
    }

    /// Returns the number of bytes this record occupies in an archive.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::{Point, Record};
    /// let record = Record::new(0, vec![Point::default(); 2]).unwrap();
    /// assert_eq!(227 + 2 * 28, record.len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        super::HEADER_SIZE + self.points.len() * super::POINT_SIZE
    }

    /// Writes the header and then every point, with nothing in between.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::{Point, Record};
    /// let record = Record::new(0, vec![Point::default()]).unwrap();
    /// let mut bytes = Vec::new();
    /// record.write_to(&mut bytes).unwrap();
    /// assert_eq!(record.len(), bytes.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        if usize::try_from(self.header.number_of_point_records).ok() != Some(self.points.len()) {
            return Err(Error::PointCountMismatch {
                declared: self.header.number_of_point_records,
                found: self.points.len(),
            });
        }
        self.header.write_to(&mut write)?;
        for point in &self.points {
            point.write_to(&mut write)?;
        }
        Ok(())
    }
}
