// CSV persistence tests

mod common;

use common::{assert_complete, sample, series_of};
use statseries::normalize::{NormalizeError, NormalizeOptions, normalize};
use statseries::series_repo;

fn collected() -> statseries::models::Series {
    let mut a = sample(100, 17, 12.5, 82_854_982);
    a.proc.cpu = "12.50 %".into();
    a.disk.sectors_read = 10;
    a.net.receive_bytes_num = 1_234;
    a.extra = b"build=42".to_vec();
    let mut b = sample(103, 400, 13.0, 83_000_000);
    b.disk.sectors_read = 30;
    b.net.receive_bytes_num = 5_678;
    series_of(vec![a, b])
}

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("etcd.csv");
    let series = normalize(&collected()).unwrap();

    series_repo::save(&path, &series).unwrap();
    let loaded = series_repo::load(&path).unwrap();

    assert_eq!(loaded, series);
    assert_eq!(loaded.pid, 42);
    assert_eq!(loaded.disk_device, "sda");
    assert_eq!(loaded.network_interface, "eth0");
    assert_eq!(loaded.rows[0].extra, b"build=42".to_vec());
}

#[test]
fn test_loaded_normalized_series_needs_no_further_work() {
    let mut buf = Vec::new();
    series_repo::write_to(&mut buf, &normalize(&collected()).unwrap()).unwrap();

    let loaded = series_repo::read_from(buf.as_slice()).unwrap();
    assert_complete(&loaded);
    assert_eq!(normalize(&loaded).unwrap(), loaded);
}

#[test]
fn test_written_header_comes_first() {
    let mut buf = Vec::new();
    series_repo::write_to(&mut buf, &collected()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let first_line = text.lines().next().unwrap();
    assert_eq!(first_line, series_repo::HEADER.join(","));
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn test_empty_series_round_trips_header_only() {
    let mut buf = Vec::new();
    series_repo::write_to(&mut buf, &statseries::models::Series::default()).unwrap();
    let loaded = series_repo::read_from(buf.as_slice()).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_load_rejects_unexpected_header() {
    let data = "UNIX-SECOND,PID\n1,2\n";
    let err = series_repo::read_from(data.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("header"));
}

#[test]
fn test_load_reports_bad_row() {
    let mut buf = Vec::new();
    series_repo::write_to(&mut buf, &collected()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let corrupted = text.replacen(",42,", ",not-a-pid,", 1);
    assert_ne!(corrupted, text);

    let err = series_repo::read_from(corrupted.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");
    let err = series_repo::load(&path).unwrap_err();
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn test_normalize_file_rewrites_in_place() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("etcd.csv");
    series_repo::save(&path, &collected()).unwrap();

    let (before, after) =
        series_repo::normalize_file(&path, &path, &NormalizeOptions::default()).unwrap();
    assert_eq!((before, after), (2, 4));
    assert_complete(&series_repo::load(&path).unwrap());
}

#[test]
fn test_normalize_file_honours_backfill_limit() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    // one corrupted second far in the future
    let series = series_of(vec![sample(100, 0, 1.0, 1), sample(4_000_000_000, 0, 2.0, 2)]);
    series_repo::save(&input, &series).unwrap();

    let options = NormalizeOptions {
        max_backfill_seconds: Some(300),
    };
    let err = series_repo::normalize_file(&input, &output, &options).unwrap_err();
    assert_eq!(
        err.downcast_ref::<NormalizeError>(),
        Some(&NormalizeError::GapTooLarge {
            missing: 3_999_999_899,
            limit: 300
        })
    );
    assert!(!output.exists());
}
