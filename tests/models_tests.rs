// Sample and series model tests

mod common;

use common::{NS, sample};
use statseries::models::{Sample, Series};

#[test]
fn test_sample_at_truncates_to_second() {
    let s = Sample::at(1_700_000_000 * NS + 999_999_999);
    assert_eq!(s.unix_second, 1_700_000_000);
    assert!(!s.is_synthetic());
}

#[test]
fn test_series_push_computes_deltas_from_previous_row() {
    let mut a = sample(1, 0, 0.0, 0);
    a.disk.sectors_read = 100;
    a.disk.writes_completed = 4;
    a.net.receive_bytes_num = 1_000;
    a.net.receive_packets = 10;
    let mut b = sample(2, 0, 0.0, 0);
    b.disk.sectors_read = 2_100;
    b.disk.writes_completed = 9;
    b.net.receive_bytes_num = 3_500;
    b.net.receive_packets = 25;

    let mut series = Series::new(42, "sda", "eth0");
    series.push(a);
    series.push(b);

    let first = &series.rows[0];
    assert_eq!(first.disk_delta.sectors_read_delta, 0);
    assert_eq!(first.net_delta.receive_bytes_num_delta, 0);
    assert_eq!(first.net_delta.receive_bytes_delta, "0 B");

    let second = &series.rows[1];
    assert_eq!(second.disk_delta.sectors_read_delta, 2_000);
    assert_eq!(second.disk_delta.read_bytes_delta, 1_024_000);
    assert_eq!(second.disk_delta.read_megabytes_delta, 1);
    assert_eq!(second.disk_delta.writes_completed_delta, 5);
    assert_eq!(second.net_delta.receive_bytes_num_delta, 2_500);
    assert_eq!(second.net_delta.receive_bytes_delta, "2.5 kB");
    assert_eq!(second.net_delta.receive_packets_delta, 15);
}

#[test]
fn test_series_push_counter_reset_saturates() {
    let mut a = sample(1, 0, 0.0, 0);
    a.disk.sectors_written = 500;
    a.net.transmit_bytes_num = 9_000;
    let b = sample(2, 0, 0.0, 0);

    let mut series = Series::new(42, "sda", "eth0");
    series.push(a);
    series.push(b);
    assert_eq!(series.rows[1].disk_delta.sectors_written_delta, 0);
    assert_eq!(series.rows[1].net_delta.transmit_bytes_num_delta, 0);
}

#[test]
fn test_series_tracks_bounds_in_any_push_order() {
    let mut series = Series::new(42, "sda", "eth0");
    assert!(series.is_empty());
    series.push(sample(20, 0, 0.0, 0));
    series.push(sample(5, 0, 0.0, 0));
    series.push(sample(11, 0, 0.0, 0));
    assert_eq!((series.min_unix_second, series.max_unix_second), (5, 20));
    assert_eq!(series.len(), 3);

    series.sort();
    let seconds: Vec<i64> = series.rows.iter().map(|s| s.unix_second).collect();
    assert_eq!(seconds, vec![5, 11, 20]);
}

#[test]
fn test_empty_like_keeps_subject_only() {
    let mut series = Series::new(7, "nvme0n1", "wlan0");
    series.push(sample(1, 0, 0.0, 0));
    let empty = series.empty_like();
    assert_eq!(empty.pid, 7);
    assert_eq!(empty.disk_device, "nvme0n1");
    assert_eq!(empty.network_interface, "wlan0");
    assert!(empty.is_empty());
}

#[test]
fn test_sample_serializes_camel_case() {
    let value = serde_json::to_value(sample(3, 0, 1.5, 10)).unwrap();
    assert_eq!(value["unixSecond"], 3);
    assert_eq!(value["proc"]["vmRssNum"], 10);
    assert_eq!(value["proc"]["cpuNum"], 1.5);
    assert!(value["diskDelta"].get("readBytesDelta").is_some());
}
