//! Raw point data format 1 records.

use super::POINT_SIZE;
use crate::{Error, Result, Transform, Vector, gps_time};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Read, Write};

/// A raw point data format 1 record.
///
/// The documentation for struct members is taken from the las 1.2 spec, with notes on how 2G
/// archives use the field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// The X, Y, and Z values are stored as long integers.
    ///
    /// The X, Y, and Z values are used in conjunction with the scale values and the offset values
    /// to determine the coordinate for each point as described in the Public Header Block section.
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The intensity value is the integer representation of the pulse return magnitude.
    pub intensity: u16,

    /// Return number, number of returns, scan direction and edge of flight line, packed into one
    /// byte.
    ///
    /// 2G sensors have a single return per pulse and leave these at zero.
    pub bit_field: u8,

    /// The classification of the point, zero in 2G archives.
    pub classification: u8,

    /// The angle of the pulse relative to the scanner, always zero in 2G archives.
    pub scan_angle: u8,

    /// This field may be used at the user’s discretion.
    ///
    /// 2G archives store the quality of the measurement here.
    pub user_data: u8,

    /// The file from which this point originated, zero in 2G archives.
    pub point_source_id: u16,

    /// The GPS Time is the double floating point time tag value at which the point was acquired.
    ///
    /// In 2G archives this is always adjusted standard GPS time, in seconds.
    pub gps_time: f64,
}

impl Point {
    /// Creates the point 2G writes for a measurement.
    ///
    /// The coordinates are in metres and are stored in micrometres, truncated toward zero. Returns
    /// an error if a coordinate doesn't fit in an i32 at that scale.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Point;
    /// let point = Point::new(1_600_000_000_000_000, 1.5, -2., 0.25, 42, 7).unwrap();
    /// assert_eq!(1_500_000, point.x);
    /// assert_eq!(-2_000_000, point.y);
    /// assert_eq!(7, point.user_data);
    /// assert!(Point::new(0, 3000., 0., 0., 0, 0).is_err());
    /// ```
    pub fn new(
        utc_time: u64,
        x: f64,
        y: f64,
        z: f64,
        intensity: u16,
        quality: u8,
    ) -> Result<Point> {
        crate::Point {
            x,
            y,
            z,
            intensity,
            quality,
            utc_time,
        }
        .into_raw(&Vector::splat(Transform::default()))
    }

    /// Decodes a point from exactly [POINT_SIZE] bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Point;
    /// let point = Point { x: 1, y: 2, z: 3, ..Default::default() };
    /// assert_eq!(point, Point::from_bytes(&point.to_bytes()).unwrap());
    /// assert!(Point::from_bytes(&[0; 27]).is_err());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Point> {
        if bytes.len() != POINT_SIZE {
            return Err(Error::BufferSize {
                expected: POINT_SIZE,
                found: bytes.len(),
            });
        }
        Point::read_from(bytes)
    }

    /// Encodes this point into its [POINT_SIZE] bytes.
    pub fn to_bytes(&self) -> [u8; POINT_SIZE] {
        let mut cursor = Cursor::new([0; POINT_SIZE]);
        // The fields fill the buffer exactly, so writing can't run out of room.
        let _ = self.write_fields(&mut cursor);
        cursor.into_inner()
    }

    /// Reads a raw point from a `Read`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Point;
    /// let bytes = Point::default().to_bytes();
    /// let point = Point::read_from(&bytes[..]).unwrap();
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Point> {
        let x = read.read_i32::<LittleEndian>()?;
        let y = read.read_i32::<LittleEndian>()?;
        let z = read.read_i32::<LittleEndian>()?;
        let intensity = read.read_u16::<LittleEndian>()?;
        let bit_field = read.read_u8()?;
        let classification = read.read_u8()?;
        let scan_angle = read.read_u8()?;
        let user_data = read.read_u8()?;
        let point_source_id = read.read_u16::<LittleEndian>()?;
        let gps_time = read.read_f64::<LittleEndian>()?;
        Ok(Point {
            x,
            y,
            z,
            intensity,
            bit_field,
            classification,
            scan_angle,
            user_data,
            point_source_id,
            gps_time,
        })
    }

    /// Writes a raw point to a `Write`.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.write_fields(&mut write).map_err(Error::Write)
    }

    fn write_fields<W: Write>(&self, write: &mut W) -> io::Result<()> {
        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        write.write_u8(self.bit_field)?;
        write.write_u8(self.classification)?;
        write.write_u8(self.scan_angle)?;
        write.write_u8(self.user_data)?;
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        write.write_f64::<LittleEndian>(self.gps_time)
    }

    /// Returns the time this point was acquired, in UTC microseconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Point;
    /// let point = Point::new(1_600_000_000_123_456, 0., 0., 0., 0, 0).unwrap();
    /// assert_eq!(1_600_000_000_123_456, point.utc_time());
    /// ```
    pub fn utc_time(&self) -> u64 {
        gps_time::adjusted_gps_seconds_to_utc(self.gps_time)
    }
}
