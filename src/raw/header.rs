//! Raw file metadata.

use super::{DEFAULT_SCALE_FACTOR, HEADER_SIZE, LASF, POINT_DATA_FORMAT_ID, POINT_SIZE};
use crate::{Error, GpsTimeType, Result, Transform, Vector, gps_time};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::NaiveDate;
use std::io::{self, Cursor, Read, Write};
use uuid::Uuid;

/// A las 1.2 header.
///
/// The documentation for each member is taken from the las 1.2 spec, with notes on how 2G
/// archives use the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
    /// The file signature must contain the four characters “LASF”, and it is required by the LAS
    /// specification.
    pub file_signature: [u8; 4],

    /// This field should be set to a value between 1 and 65,535, inclusive.
    ///
    /// 2G archives leave it at zero.
    pub file_source_id: u16,

    /// This is a bit field used to indicate certain global properties about the file.
    ///
    /// Only the low bit is defined: if set, the GPS Time in the point records is standard GPS
    /// Time minus 1 x 10^9 (Adjusted Standard GPS Time). 2G archives always set it.
    pub global_encoding: u16,

    /// The first of four fields that comprise a Globally Unique Identifier (GUID).
    pub guid_data_1: u32,
    #[allow(missing_docs)]
    pub guid_data_2: u16,
    #[allow(missing_docs)]
    pub guid_data_3: u16,

    /// The last eight bytes of the GUID.
    ///
    /// 2G archives store the record's creation time here, as adjusted GPS microseconds in a
    /// little-endian u64.
    pub guid_data_4: u64,

    /// The major version number, always 1.
    pub version_major: u8,

    /// The minor version number, always 2.
    pub version_minor: u8,

    /// Generally the hardware system that created the las file.
    ///
    /// Nul-padded but not necessarily nul-terminated.
    pub system_identifier: [u8; 32],

    /// The software that generated the las file.
    ///
    /// Nul-padded but not necessarily nul-terminated.
    pub generating_software: [u8; 32],

    /// Day, expressed as an unsigned short, on which this file was created.
    ///
    /// Day is computed as the Greenwich Mean Time (GMT) day. January 1 is considered day 1.
    pub file_creation_day_of_year: u16,

    /// The year, expressed as a four digit number, in which the file was created.
    pub file_creation_year: u16,

    /// The size, in bytes, of the Public Header Block itself.
    pub header_size: u16,

    /// The actual number of bytes from the beginning of the file to the first field of the first
    /// point record data field.
    ///
    /// With no variable length records this is the header size.
    pub offset_to_point_data: u32,

    /// This field contains the current number of Variable Length Records, always zero here.
    pub number_of_variable_length_records: u32,

    /// The point data format ID corresponds to the point data record format type.
    pub point_data_format_id: u8,

    /// The size, in bytes, of the Point Data Record.
    pub point_data_record_length: u16,

    /// This field contains the total number of point records within the file.
    ///
    /// In an archive, this is how many point records follow the header before the next header.
    pub number_of_point_records: u32,

    /// This field contains an array of the total point records per return.
    ///
    /// Unused by 2G archives and kept at zero.
    pub number_of_points_by_return: [u32; 5],

    /// The scale factor fields contain a double floating point value that is used to scale the
    /// corresponding X, Y, and Z long values within the point records.
    pub x_scale_factor: f64,
    #[allow(missing_docs)]
    pub y_scale_factor: f64,
    #[allow(missing_docs)]
    pub z_scale_factor: f64,

    /// The offset fields should be used to set the overall offset for the point records.
    ///
    /// Xcoordinate = (Xrecord * Xscale) + Xoffset
    pub x_offset: f64,
    #[allow(missing_docs)]
    pub y_offset: f64,
    #[allow(missing_docs)]
    pub z_offset: f64,

    /// The max and min data fields are the actual unscaled extents of the LAS point file data.
    ///
    /// These are neither checked on read nor computed on write.
    pub max_x: f64,
    #[allow(missing_docs)]
    pub min_x: f64,
    #[allow(missing_docs)]
    pub max_y: f64,
    #[allow(missing_docs)]
    pub min_y: f64,
    #[allow(missing_docs)]
    pub max_z: f64,
    #[allow(missing_docs)]
    pub min_z: f64,
}

impl Header {
    /// Creates the header 2G writes for a record created at `utc_time` with `number_of_points`
    /// points.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Header;
    /// let header = Header::new(1_600_000_000_000_000, 3);
    /// assert_eq!(*b"LASF", header.file_signature);
    /// assert_eq!(3, header.number_of_point_records);
    /// assert_eq!(1_600_000_000_000_000, header.utc_time());
    /// ```
    pub fn new(utc_time: u64, number_of_points: u32) -> Header {
        Header {
            file_signature: LASF,
            file_source_id: 0,
            global_encoding: GpsTimeType::Standard.into(),
            guid_data_1: 0,
            guid_data_2: 0,
            guid_data_3: 0,
            guid_data_4: gps_time::utc_to_adjusted_gps_us(utc_time),
            version_major: 1,
            version_minor: 2,
            system_identifier: [0; 32],
            generating_software: [0; 32],
            file_creation_day_of_year: 0,
            file_creation_year: 0,
            header_size: HEADER_SIZE as u16,
            offset_to_point_data: HEADER_SIZE as u32,
            number_of_variable_length_records: 0,
            point_data_format_id: POINT_DATA_FORMAT_ID,
            point_data_record_length: POINT_SIZE as u16,
            number_of_point_records: number_of_points,
            number_of_points_by_return: [0; 5],
            x_scale_factor: DEFAULT_SCALE_FACTOR,
            y_scale_factor: DEFAULT_SCALE_FACTOR,
            z_scale_factor: DEFAULT_SCALE_FACTOR,
            x_offset: 0.,
            y_offset: 0.,
            z_offset: 0.,
            max_x: 0.,
            min_x: 0.,
            max_y: 0.,
            min_y: 0.,
            max_z: 0.,
            min_z: 0.,
        }
    }

    /// Decodes a header from exactly [HEADER_SIZE] bytes.
    ///
    /// No field is validated; see [Header::validate].
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Header;
    /// let header = Header::new(0, 42);
    /// assert_eq!(header, Header::from_bytes(&header.to_bytes()).unwrap());
    /// assert!(Header::from_bytes(&[0; 28]).is_err());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Header> {
        if bytes.len() != HEADER_SIZE {
            return Err(Error::BufferSize {
                expected: HEADER_SIZE,
                found: bytes.len(),
            });
        }
        Header::read_from(bytes)
    }

    /// Encodes this header into its [HEADER_SIZE] bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Header;
    /// let bytes = Header::new(0, 0).to_bytes();
    /// assert_eq!(b"LASF", &bytes[0..4]);
    /// ```
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut cursor = Cursor::new([0; HEADER_SIZE]);
        // The fields fill the buffer exactly, so writing can't run out of room.
        let _ = self.write_fields(&mut cursor);
        cursor.into_inner()
    }

    /// Reads a raw header from a `Read`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las2g::raw::Header;
    /// let bytes = Header::new(0, 0).to_bytes();
    /// let header = Header::read_from(Cursor::new(bytes)).unwrap();
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Header> {
        let mut file_signature = [0; 4];
        read.read_exact(&mut file_signature)?;
        let file_source_id = read.read_u16::<LittleEndian>()?;
        let global_encoding = read.read_u16::<LittleEndian>()?;
        let guid_data_1 = read.read_u32::<LittleEndian>()?;
        let guid_data_2 = read.read_u16::<LittleEndian>()?;
        let guid_data_3 = read.read_u16::<LittleEndian>()?;
        let guid_data_4 = read.read_u64::<LittleEndian>()?;
        let version_major = read.read_u8()?;
        let version_minor = read.read_u8()?;
        let mut system_identifier = [0; 32];
        read.read_exact(&mut system_identifier)?;
        let mut generating_software = [0; 32];
        read.read_exact(&mut generating_software)?;
        let file_creation_day_of_year = read.read_u16::<LittleEndian>()?;
        let file_creation_year = read.read_u16::<LittleEndian>()?;
        let header_size = read.read_u16::<LittleEndian>()?;
        let offset_to_point_data = read.read_u32::<LittleEndian>()?;
        let number_of_variable_length_records = read.read_u32::<LittleEndian>()?;
        let point_data_format_id = read.read_u8()?;
        let point_data_record_length = read.read_u16::<LittleEndian>()?;
        let number_of_point_records = read.read_u32::<LittleEndian>()?;
        let mut number_of_points_by_return = [0; 5];
        for n in number_of_points_by_return.iter_mut() {
            *n = read.read_u32::<LittleEndian>()?;
        }
        let x_scale_factor = read.read_f64::<LittleEndian>()?;
        let y_scale_factor = read.read_f64::<LittleEndian>()?;
        let z_scale_factor = read.read_f64::<LittleEndian>()?;
        let x_offset = read.read_f64::<LittleEndian>()?;
        let y_offset = read.read_f64::<LittleEndian>()?;
        let z_offset = read.read_f64::<LittleEndian>()?;
        let max_x = read.read_f64::<LittleEndian>()?;
        let min_x = read.read_f64::<LittleEndian>()?;
        let max_y = read.read_f64::<LittleEndian>()?;
        let min_y = read.read_f64::<LittleEndian>()?;
        let max_z = read.read_f64::<LittleEndian>()?;
        let min_z = read.read_f64::<LittleEndian>()?;
        Ok(Header {
            file_signature,
            file_source_id,
            global_encoding,
            guid_data_1,
            guid_data_2,
            guid_data_3,
            guid_data_4,
            version_major,
            version_minor,
            system_identifier,
            generating_software,
            file_creation_day_of_year,
            file_creation_year,
            header_size,
            offset_to_point_data,
            number_of_variable_length_records,
            point_data_format_id,
            point_data_record_length,
            number_of_point_records,
            number_of_points_by_return,
            x_scale_factor,
            y_scale_factor,
            z_scale_factor,
            x_offset,
            y_offset,
            z_offset,
            max_x,
            min_x,
            max_y,
            min_y,
            max_z,
            min_z,
        })
    }

    /// Writes a raw header to a `Write`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Header;
    /// let mut bytes = Vec::new();
    /// Header::new(0, 0).write_to(&mut bytes).unwrap();
    /// assert_eq!(227, bytes.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.write_fields(&mut write).map_err(Error::Write)
    }

    fn write_fields<W: Write>(&self, write: &mut W) -> io::Result<()> {
        write.write_all(&self.file_signature)?;
        write.write_u16::<LittleEndian>(self.file_source_id)?;
        write.write_u16::<LittleEndian>(self.global_encoding)?;
        write.write_u32::<LittleEndian>(self.guid_data_1)?;
        write.write_u16::<LittleEndian>(self.guid_data_2)?;
        write.write_u16::<LittleEndian>(self.guid_data_3)?;
        write.write_u64::<LittleEndian>(self.guid_data_4)?;
        write.write_u8(self.version_major)?;
        write.write_u8(self.version_minor)?;
        write.write_all(&self.system_identifier)?;
        write.write_all(&self.generating_software)?;
        write.write_u16::<LittleEndian>(self.file_creation_day_of_year)?;
        write.write_u16::<LittleEndian>(self.file_creation_year)?;
        write.write_u16::<LittleEndian>(self.header_size)?;
        write.write_u32::<LittleEndian>(self.offset_to_point_data)?;
        write.write_u32::<LittleEndian>(self.number_of_variable_length_records)?;
        write.write_u8(self.point_data_format_id)?;
        write.write_u16::<LittleEndian>(self.point_data_record_length)?;
        write.write_u32::<LittleEndian>(self.number_of_point_records)?;
        for n in self.number_of_points_by_return {
            write.write_u32::<LittleEndian>(n)?;
        }
        write.write_f64::<LittleEndian>(self.x_scale_factor)?;
        write.write_f64::<LittleEndian>(self.y_scale_factor)?;
        write.write_f64::<LittleEndian>(self.z_scale_factor)?;
        write.write_f64::<LittleEndian>(self.x_offset)?;
        write.write_f64::<LittleEndian>(self.y_offset)?;
        write.write_f64::<LittleEndian>(self.z_offset)?;
        write.write_f64::<LittleEndian>(self.max_x)?;
        write.write_f64::<LittleEndian>(self.min_x)?;
        write.write_f64::<LittleEndian>(self.max_y)?;
        write.write_f64::<LittleEndian>(self.min_y)?;
        write.write_f64::<LittleEndian>(self.max_z)?;
        write.write_f64::<LittleEndian>(self.min_z)
    }

    /// Checks the fields that every 2G header must carry.
    ///
    /// The point count is not checked here, since its limit is a reader option.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Header;
    /// let mut header = Header::new(0, 0);
    /// assert!(header.validate().is_ok());
    /// header.point_data_format_id = 3;
    /// assert!(header.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.file_signature != LASF {
            return Err(Error::InvalidFileSignature(self.file_signature));
        }
        if usize::from(self.header_size) != HEADER_SIZE {
            return Err(Error::InvalidHeaderSize(self.header_size));
        }
        if self.point_data_format_id != POINT_DATA_FORMAT_ID {
            return Err(Error::InvalidPointFormat(self.point_data_format_id));
        }
        if usize::from(self.point_data_record_length) != POINT_SIZE {
            return Err(Error::InvalidPointDataRecordLength(
                self.point_data_record_length,
            ));
        }
        Ok(())
    }

    /// Returns the scale and offset for each axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Header;
    /// let transforms = Header::new(0, 0).transforms();
    /// assert_eq!(1e-6, transforms.x.scale);
    /// ```
    pub fn transforms(&self) -> Vector<Transform> {
        Vector {
            x: Transform {
                scale: self.x_scale_factor,
                offset: self.x_offset,
            },
            y: Transform {
                scale: self.y_scale_factor,
                offset: self.y_offset,
            },
            z: Transform {
                scale: self.z_scale_factor,
                offset: self.z_offset,
            },
        }
    }

    /// Returns the meaning of the gps time in the points.
    pub fn gps_time_type(&self) -> GpsTimeType {
        GpsTimeType::from(self.global_encoding)
    }

    /// Returns the creation time stored in the GUID, in UTC microseconds.
    pub fn utc_time(&self) -> u64 {
        gps_time::adjusted_gps_to_utc(self.guid_data_4)
    }

    /// Assembles the four GUID fields into a uuid.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::raw::Header;
    /// let mut header = Header::new(0, 0);
    /// header.guid_data_4 = 0x0102;
    /// assert_eq!("00000000-0000-0000-0201-000000000000", header.guid().to_string());
    /// ```
    pub fn guid(&self) -> Uuid {
        Uuid::from_fields(
            self.guid_data_1,
            self.guid_data_2,
            self.guid_data_3,
            &self.guid_data_4.to_le_bytes(),
        )
    }

    /// Returns the file creation date, if one was recorded.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use las2g::raw::Header;
    /// let mut header = Header::new(0, 0);
    /// assert_eq!(None, header.creation_date());
    /// header.file_creation_year = 2014;
    /// header.file_creation_day_of_year = 255;
    /// assert_eq!(NaiveDate::from_ymd_opt(2014, 9, 12), header.creation_date());
    /// ```
    pub fn creation_date(&self) -> Option<NaiveDate> {
        if self.file_creation_year == 0 || self.file_creation_day_of_year == 0 {
            None
        } else {
            NaiveDate::from_yo_opt(
                i32::from(self.file_creation_year),
                u32::from(self.file_creation_day_of_year),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let mut header = Header::new(0, 0x0A0B_0C0D);
        header.max_z = 1.;
        let bytes = header.to_bytes();
        assert_eq!(HEADER_SIZE, bytes.len());
        assert_eq!([0x01, 0x00], bytes[6..8]);
        assert_eq!([1, 2], bytes[24..26]);
        assert_eq!([0xE3, 0x00], bytes[94..96]);
        assert_eq!([0xE3, 0x00, 0x00, 0x00], bytes[96..100]);
        assert_eq!(1, bytes[104]);
        assert_eq!([28, 0], bytes[105..107]);
        assert_eq!([0x0D, 0x0C, 0x0B, 0x0A], bytes[107..111]);
        assert_eq!(1e-6f64.to_le_bytes(), bytes[131..139]);
        assert_eq!(1f64.to_le_bytes(), bytes[211..219]);
    }

    #[test]
    fn guid_data_4_holds_creation_time() {
        let utc_time = 1_410_423_917_711_427;
        let header = Header::new(utc_time, 0);
        assert_eq!(
            gps_time::utc_to_adjusted_gps_us(utc_time).to_le_bytes(),
            header.to_bytes()[16..24]
        );
        assert_eq!(utc_time, header.utc_time());
    }

    #[test]
    fn defaults() {
        let header = Header::new(0, 7);
        assert!(header.validate().is_ok());
        assert_eq!(GpsTimeType::Standard, header.gps_time_type());
        assert_eq!([0; 5], header.number_of_points_by_return);
        assert_eq!(0, header.number_of_variable_length_records);
        assert_eq!(Transform::default(), header.transforms().y);
    }

    #[test]
    fn stream_roundtrip() {
        let header = Header::new(1_600_000_000_000_000, 2048);
        let mut cursor = Cursor::new(Vec::new());
        header.write_to(&mut cursor).unwrap();
        cursor.set_position(0);
        assert_eq!(header, Header::read_from(cursor).unwrap());
    }

    #[test]
    fn short_stream() {
        let bytes = Header::new(0, 0).to_bytes();
        assert!(Header::read_from(&bytes[..HEADER_SIZE - 1]).is_err());
    }

    #[test]
    fn invalid_signature() {
        let mut header = Header::new(0, 0);
        header.file_signature = *b"LASG";
        assert!(matches!(
            header.validate().unwrap_err(),
            Error::InvalidFileSignature(_)
        ));
    }

    #[test]
    fn invalid_sizes() {
        let mut header = Header::new(0, 0);
        header.header_size = 375;
        assert!(matches!(
            header.validate().unwrap_err(),
            Error::InvalidHeaderSize(375)
        ));
        let mut header = Header::new(0, 0);
        header.point_data_record_length = 34;
        assert!(matches!(
            header.validate().unwrap_err(),
            Error::InvalidPointDataRecordLength(34)
        ));
    }
}
