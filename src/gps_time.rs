//! Conversions between UTC microseconds and adjusted GPS time.
//!
//! Callers deal in UTC microseconds since the Unix epoch. The points store adjusted standard GPS
//! time, in seconds, as an f64: satellite GPS time minus 1e9 seconds. Headers keep the same
//! quantity in whole microseconds in the fourth field of their GUID.
//!
//! The leap second offset is fixed at the value in force since 2017. It is not looked up per
//! timestamp, so times from before 2017 are shifted by the leap seconds added since.
//!
//! Microsecond values are converted with wrapping arithmetic, so a UTC time from before the
//! adjusted GPS origin (September 2011) maps to the two's complement of a negative adjusted time
//! and back again without loss.

use chrono::{DateTime, Utc};

/// Seconds from the Unix epoch to the GPS epoch, 1980-01-06T00:00:00Z.
pub const GPS_EPOCH_OFFSET_SECONDS: u64 = 315_964_800;

/// The GPS-UTC leap second offset applied to every conversion.
pub const LEAP_SECONDS: u64 = 18;

/// Seconds subtracted from standard GPS time to get adjusted GPS time.
pub const ADJUSTED_GPS_OFFSET_SECONDS: u64 = 1_000_000_000;

const MICROSECONDS_PER_SECOND: u64 = 1_000_000;
const GPS_EPOCH_OFFSET_US: u64 = GPS_EPOCH_OFFSET_SECONDS * MICROSECONDS_PER_SECOND;
const LEAP_US: u64 = LEAP_SECONDS * MICROSECONDS_PER_SECOND;
const ADJUSTED_GPS_OFFSET_US: u64 = ADJUSTED_GPS_OFFSET_SECONDS * MICROSECONDS_PER_SECOND;

/// The meaning of GPS time in the point records, bit 0 of the header's global encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GpsTimeType {
    /// GPS Week Time (the same as previous versions of LAS).
    Week,

    /// Standard GPS Time minus 1e9.
    ///
    /// Every header this crate writes uses this time type.
    #[default]
    Standard,
}

impl GpsTimeType {
    /// Returns true if this time type is gps standard time.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::GpsTimeType;
    /// assert!(!GpsTimeType::Week.is_standard());
    /// assert!(GpsTimeType::Standard.is_standard());
    /// ```
    pub fn is_standard(&self) -> bool {
        match *self {
            GpsTimeType::Week => false,
            GpsTimeType::Standard => true,
        }
    }
}

impl From<u16> for GpsTimeType {
    fn from(global_encoding: u16) -> GpsTimeType {
        if global_encoding & 1 == 1 {
            GpsTimeType::Standard
        } else {
            GpsTimeType::Week
        }
    }
}

impl From<GpsTimeType> for u16 {
    fn from(gps_time_type: GpsTimeType) -> u16 {
        match gps_time_type {
            GpsTimeType::Week => 0,
            GpsTimeType::Standard => 1,
        }
    }
}

/// Converts UTC microseconds to adjusted GPS microseconds.
///
/// # Examples
///
/// ```
/// use las2g::gps_time;
/// let utc = 1_600_000_000_000_000;
/// assert_eq!(utc, gps_time::adjusted_gps_to_utc(gps_time::utc_to_adjusted_gps_us(utc)));
/// ```
pub fn utc_to_adjusted_gps_us(utc_us: u64) -> u64 {
    utc_us
        .wrapping_sub(GPS_EPOCH_OFFSET_US)
        .wrapping_add(LEAP_US)
        .wrapping_sub(ADJUSTED_GPS_OFFSET_US)
}

/// Converts UTC microseconds to adjusted GPS time in seconds.
///
/// # Examples
///
/// ```
/// use las2g::gps_time;
/// // 2017-01-01T00:00:00Z
/// assert_eq!(167_264_018., gps_time::utc_to_adjusted_gps(1_483_228_800_000_000));
/// ```
pub fn utc_to_adjusted_gps(utc_us: u64) -> f64 {
    utc_to_adjusted_gps_us(utc_us) as i64 as f64 / MICROSECONDS_PER_SECOND as f64
}

/// Converts adjusted GPS microseconds back to UTC microseconds.
///
/// # Examples
///
/// ```
/// use las2g::gps_time;
/// assert_eq!(1_483_228_800_000_000, gps_time::adjusted_gps_to_utc(167_264_018_000_000));
/// ```
pub fn adjusted_gps_to_utc(adjusted_gps_us: u64) -> u64 {
    GPS_EPOCH_OFFSET_US
        .wrapping_add(adjusted_gps_us)
        .wrapping_sub(LEAP_US)
        .wrapping_add(ADJUSTED_GPS_OFFSET_US)
}

/// Converts adjusted GPS time in seconds, as stored in a point, to UTC microseconds.
///
/// The seconds are rounded to the nearest microsecond first.
///
/// # Examples
///
/// ```
/// use las2g::gps_time;
/// let utc = 1_410_423_917_711_427;
/// assert_eq!(utc, gps_time::adjusted_gps_seconds_to_utc(gps_time::utc_to_adjusted_gps(utc)));
/// ```
pub fn adjusted_gps_seconds_to_utc(adjusted_gps: f64) -> u64 {
    let microseconds = (adjusted_gps * MICROSECONDS_PER_SECOND as f64).round() as i64;
    adjusted_gps_to_utc(microseconds as u64)
}

/// Returns UTC microseconds as a chrono date time, for display.
///
/// Returns `None` if the value is out of chrono's range.
///
/// # Examples
///
/// ```
/// use las2g::gps_time;
/// let datetime = gps_time::to_datetime(1_483_228_800_000_000).unwrap();
/// assert_eq!("2017-01-01T00:00:00+00:00", datetime.to_rfc3339());
/// ```
pub fn to_datetime(utc_us: u64) -> Option<DateTime<Utc>> {
    i64::try_from(utc_us)
        .ok()
        .and_then(DateTime::from_timestamp_micros)
}

/// Returns UTC microseconds for a chrono date time.
///
/// Returns `None` for times before the Unix epoch.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use las2g::gps_time;
/// let datetime = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(Some(1_483_228_800_000_000), gps_time::from_datetime(datetime));
/// ```
pub fn from_datetime(datetime: DateTime<Utc>) -> Option<u64> {
    u64::try_from(datetime.timestamp_micros()).ok()
}
