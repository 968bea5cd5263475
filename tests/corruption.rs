//! Damaged archives decode to the records before the damage.

use las2g::{Error, MAX_POINTS_PER_RECORD, Point, Reader, ReaderOptions, Record, Status, raw};
use std::io::{self, Cursor, Read};

fn encode(counts: &[usize]) -> (Vec<u8>, Vec<usize>) {
    let records = counts
        .iter()
        .map(|&count| Record::new(0, vec![Point::default(); count]))
        .collect::<Vec<_>>();
    let mut bytes = Vec::new();
    las2g::encode_archive(&mut bytes, &records).unwrap();
    let mut boundaries = vec![0];
    for &count in counts {
        let last = *boundaries.last().unwrap();
        boundaries.push(last + raw::HEADER_SIZE + count * raw::POINT_SIZE);
    }
    (bytes, boundaries)
}

#[test]
fn empty_stream() {
    let (records, status) = las2g::decode_archive(Cursor::new(Vec::new()));
    assert!(records.is_empty());
    assert!(matches!(status, Status::Ok(0)));
}

#[test]
fn truncated_at_every_offset() {
    let (bytes, boundaries) = encode(&[2, 0, 1]);
    for len in 0..=bytes.len() {
        let (records, status) = las2g::decode_archive(Cursor::new(bytes[..len].to_vec()));
        let complete = boundaries.iter().filter(|&&b| b > 0 && b <= len).count();
        assert_eq!(complete, records.len(), "truncated to {len} bytes");
        assert_eq!(complete, status.count());
        if boundaries.contains(&len) {
            assert!(!status.is_partial(), "truncated to {len} bytes");
        } else {
            assert!(status.is_partial(), "truncated to {len} bytes");
            assert!(status.reason().unwrap().is_corruption());
        }
    }
}

#[test]
fn oversized_record_is_discarded() {
    let (mut bytes, _) = encode(&[1, 1]);
    raw::Header::new(0, MAX_POINTS_PER_RECORD + 1)
        .write_to(&mut bytes)
        .unwrap();
    bytes.extend(vec![0; 2049 * raw::POINT_SIZE]);
    let (records, status) = las2g::decode_archive(Cursor::new(bytes));
    assert_eq!(2, records.len());
    assert_eq!(2, status.count());
    assert!(matches!(
        status.reason(),
        Some(Error::OversizedRecord { record: 2, declared: 2049, .. })
    ));
}

#[test]
fn largest_record_is_accepted() {
    let (bytes, _) = encode(&[MAX_POINTS_PER_RECORD as usize]);
    let (records, status) = las2g::decode_archive(Cursor::new(bytes));
    assert!(!status.is_partial());
    assert_eq!(2048, records[0].number_of_points());
}

#[test]
fn raised_limit() {
    let mut bytes = Vec::new();
    raw::Record::new(0, vec![raw::Point::default(); 3000])
        .unwrap()
        .write_to(&mut bytes)
        .unwrap();
    let (_, status) = las2g::decode_archive(Cursor::new(bytes.clone()));
    assert!(status.is_partial());

    let options = ReaderOptions::default().with_max_points_per_record(4096);
    let (records, status) = Reader::with_options(Cursor::new(bytes), options)
        .read_all();
    assert!(!status.is_partial());
    assert_eq!(3000, records[0].number_of_points());
}

#[test]
fn garbage_after_last_record() {
    let (mut bytes, _) = encode(&[1]);
    bytes.extend(vec![0xff; raw::HEADER_SIZE]);
    let (records, status) = las2g::decode_archive(Cursor::new(bytes));
    assert_eq!(1, records.len());
    assert!(matches!(
        status.reason(),
        Some(Error::InvalidFileSignature(_))
    ));
}

struct FailingSource {
    bytes: Cursor<Vec<u8>>,
}

impl Read for FailingSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.bytes.read(buf)? {
            0 => Err(io::Error::other("medium error")),
            n => Ok(n),
        }
    }
}

#[test]
fn failing_source_keeps_complete_records() {
    let (mut bytes, boundaries) = encode(&[3, 0]);
    bytes.extend_from_slice(&[0; 10]);
    let (records, status) = las2g::decode_archive(FailingSource {
        bytes: Cursor::new(bytes),
    });
    assert_eq!(2, records.len());
    assert_eq!(3, records[0].number_of_points());
    assert_eq!(boundaries.len() - 1, status.count());
    assert!(matches!(
        status,
        Status::PartialOk {
            count: 2,
            reason: Error::Io(_)
        }
    ));
}
