//! Records, the unit of a 2G archive.

use crate::{Header, Point, Result, raw};

/// The records of an archive, in stream order.
pub type Archive = Vec<Record>;

/// One las file of an archive, a header and its points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    /// The record metadata.
    pub header: Header,
    /// The points, in stream order.
    pub points: Vec<Point>,
}

impl Record {
    /// Creates a record created at `utc_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::{Point, Record};
    /// let record = Record::new(1_600_000_000_000_000, vec![Point::default()]);
    /// assert_eq!(1, record.number_of_points());
    /// ```
    pub fn new(utc_time: u64, points: Vec<Point>) -> Record {
        Record {
            header: Header::new(utc_time),
            points,
        }
    }

    /// Converts a raw record, applying its header's scale and offset to every point.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::{raw, Record};
    /// let raw_point = raw::Point { x: 2_500_000, ..Default::default() };
    /// let raw_record = raw::Record::new(0, vec![raw_point]).unwrap();
    /// let record = Record::from_raw(&raw_record);
    /// assert_eq!(2.5, record.points[0].x);
    /// ```
    pub fn from_raw(raw_record: &raw::Record) -> Record {
        let header = Header::from(&raw_record.header);
        let points = raw_record
            .points
            .iter()
            .map(|raw_point| Point::new(*raw_point, &header.transforms))
            .collect();
        Record { header, points }
    }

    /// Converts this record to the raw record 2G writes.
    ///
    /// The raw header is always rebuilt from the creation time and the number of points, and
    /// the points are converted with that header's transforms. Transforms carried over from a
    /// read are not reused.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::{Point, Record};
    /// let record = Record::new(0, vec![Point { x: 1., ..Default::default() }]);
    /// let raw_record = record.to_raw().unwrap();
    /// assert_eq!(1, raw_record.header.number_of_point_records);
    /// assert_eq!(1_000_000, raw_record.points[0].x);
    /// ```
    pub fn to_raw(&self) -> Result<raw::Record> {
        let header = raw::Header::new(self.header.utc_time, u32::try_from(self.points.len())?);
        let transforms = header.transforms();
        let points = self
            .points
            .iter()
            .map(|point| point.into_raw(&transforms))
            .collect::<Result<Vec<_>>>()?;
        Ok(raw::Record { header, points })
    }

    /// Returns the number of points in this record.
    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Transform, Vector};

    #[test]
    fn to_raw_ignores_read_transforms() {
        let mut record = Record::new(
            0,
            vec![Point {
                x: 1.,
                ..Default::default()
            }],
        );
        record.header.transforms = Vector::splat(Transform {
            scale: 0.01,
            offset: 10.,
        });
        let raw_record = record.to_raw().unwrap();
        assert_eq!(1e-6, raw_record.header.x_scale_factor);
        assert_eq!(0., raw_record.header.x_offset);
        assert_eq!(1_000_000, raw_record.points[0].x);
    }

    #[test]
    fn to_raw_counts_points() {
        let record = Record::new(0, vec![Point::default(); 5]);
        assert_eq!(5, record.to_raw().unwrap().header.number_of_point_records);
    }

    #[test]
    fn to_raw_out_of_range() {
        let record = Record::new(
            0,
            vec![Point {
                y: -1e5,
                ..Default::default()
            }],
        );
        assert!(record.to_raw().is_err());
    }

    #[test]
    fn from_raw_keeps_creation_time() {
        let raw_record = raw::Record::new(1_410_423_917_711_427, Vec::new()).unwrap();
        let record = Record::from_raw(&raw_record);
        assert_eq!(1_410_423_917_711_427, record.header.utc_time);
        assert_eq!(0, record.number_of_points());
    }
}
