// Shared test helpers

#![allow(dead_code)]

use statseries::models::*;

pub const NS: i64 = 1_000_000_000;

/// Real sample at `second` (+`offset_ns`) with the given cpu and rss, on a fixed subject.
pub fn sample(second: i64, offset_ns: i64, cpu_num: f64, vm_rss_num: u64) -> Sample {
    let mut s = Sample::at(second * NS + offset_ns);
    s.proc = ProcStat {
        program: "etcd".into(),
        state: "S (sleeping)".into(),
        pid: 42,
        ppid: 1,
        cpu_num,
        vm_rss_num,
        vm_size_num: vm_rss_num * 2,
        threads: 8,
        fd: 30,
        ..Default::default()
    };
    s.disk.device = "sda".into();
    s.net.interface = "eth0".into();
    s
}

pub fn series_of(samples: Vec<Sample>) -> Series {
    let mut series = Series::new(42, "sda", "eth0");
    for s in samples {
        series.push(s);
    }
    series
}

/// Asserts exactly one row per second from min to max, ascending.
pub fn assert_complete(series: &Series) {
    let seconds: Vec<i64> = series.rows.iter().map(|s| s.unix_second).collect();
    let expected: Vec<i64> = (series.min_unix_second..=series.max_unix_second).collect();
    assert_eq!(seconds, expected);
}
