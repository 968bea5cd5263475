//! Counts the records and points in a 2G archive.

use las2g::Reader;

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("Must provide a path to a 2G archive");
    let (records, status) = Reader::from_path(path)
        .expect("Unable to open reader")
        .read_all();
    let npoints: usize = records.iter().map(|record| record.number_of_points()).sum();
    println!("Number of records: {}", status.count());
    println!("Number of points: {}", npoints);
    if let Some(reason) = status.reason() {
        println!("Stopped early: {}", reason);
    }
}
