//! 2G points, in real-world units.

use crate::{Result, Transform, Vector, gps_time, raw};

/// A point is the basic unit of information in a 2G archive.
///
/// Unlike [raw::Point], coordinates are in metres and time is UTC microseconds since the Unix
/// epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// The x coordinate, in metres.
    pub x: f64,
    /// The y coordinate, in metres.
    pub y: f64,
    /// The z coordinate, in metres.
    pub z: f64,
    /// The integer representation of the return magnitude.
    pub intensity: u16,
    /// The quality of the measurement, stored in the point's user data.
    pub quality: u8,
    /// The time the point was acquired, in UTC microseconds since the Unix epoch.
    pub utc_time: u64,
}

impl Point {
    /// Creates a point from a raw point and the transforms of its record's header.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::{raw, Point, Transform, Vector};
    /// let raw_point = raw::Point { x: 1, y: 2, z: 3, ..Default::default() };
    /// let transforms = Vector::splat(Transform { scale: 0.5, offset: 10. });
    /// let point = Point::new(raw_point, &transforms);
    /// assert_eq!(10.5, point.x);
    /// assert_eq!(11.5, point.z);
    /// ```
    pub fn new(raw_point: raw::Point, transforms: &Vector<Transform>) -> Point {
        Point {
            x: transforms.x.direct(raw_point.x),
            y: transforms.y.direct(raw_point.y),
            z: transforms.z.direct(raw_point.z),
            intensity: raw_point.intensity,
            quality: raw_point.user_data,
            utc_time: raw_point.utc_time(),
        }
    }

    /// Creates a raw point using the transforms of the record's header.
    ///
    /// Fields 2G doesn't use are zeroed.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::{Point, Transform, Vector};
    /// let point = Point { x: 1., quality: 9, ..Default::default() };
    /// let raw_point = point.into_raw(&Vector::splat(Transform::default())).unwrap();
    /// assert_eq!(1_000_000, raw_point.x);
    /// assert_eq!(9, raw_point.user_data);
    /// ```
    pub fn into_raw(self, transforms: &Vector<Transform>) -> Result<raw::Point> {
        Ok(raw::Point {
            x: transforms.x.inverse(self.x)?,
            y: transforms.y.inverse(self.y)?,
            z: transforms.z.inverse(self.z)?,
            intensity: self.intensity,
            user_data: self.quality,
            gps_time: gps_time::utc_to_adjusted_gps(self.utc_time),
            ..Default::default()
        })
    }
}
