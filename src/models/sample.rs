// One measurement: process, load average, disk, network groups plus a user blob

use serde::{Deserialize, Serialize};

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Per-process stats. `cpu`, `vm_rss` and `vm_size` are display strings derived from the
/// `*_num` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcStat {
    pub program: String,
    pub state: String,
    pub pid: i64,
    pub ppid: i64,
    pub cpu: String,
    pub vm_rss: String,
    pub vm_size: String,
    pub fd: u64,
    pub threads: u64,
    pub voluntary_ctxt_switches: u64,
    pub nonvoluntary_ctxt_switches: u64,
    pub cpu_num: f64,
    pub vm_rss_num: u64,
    pub vm_size_num: u64,
}

/// Host load average from /proc/loadavg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAvg {
    pub load_avg_1_minute: f64,
    pub load_avg_5_minute: f64,
    pub load_avg_15_minute: f64,
    pub runnable_kernel_scheduling_entities: i64,
    pub current_kernel_scheduling_entities: i64,
    pub last_pid: i64,
}

/// Cumulative block device counters from /proc/diskstats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskStat {
    pub device: String,
    pub reads_completed: u64,
    pub sectors_read: u64,
    pub time_spent_on_reading: String,
    pub writes_completed: u64,
    pub sectors_written: u64,
    pub time_spent_on_writing: String,
    pub time_spent_on_reading_ms: u64,
    pub time_spent_on_writing_ms: u64,
}

/// Disk counter differences against the previous real sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskDelta {
    pub reads_completed_delta: u64,
    pub sectors_read_delta: u64,
    pub writes_completed_delta: u64,
    pub sectors_written_delta: u64,
    pub read_bytes_delta: u64,
    pub read_megabytes_delta: u64,
    pub write_bytes_delta: u64,
    pub write_megabytes_delta: u64,
}

/// Cumulative interface counters from /proc/net/dev.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetStat {
    pub interface: String,
    pub receive_bytes: String,
    pub receive_packets: u64,
    pub transmit_bytes: String,
    pub transmit_packets: u64,
    pub receive_bytes_num: u64,
    pub transmit_bytes_num: u64,
}

/// Interface counter differences against the previous real sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetDelta {
    pub receive_bytes_delta: String,
    pub receive_packets_delta: u64,
    pub transmit_bytes_delta: String,
    pub transmit_packets_delta: u64,
    pub receive_bytes_num_delta: u64,
    pub transmit_bytes_num_delta: u64,
}

/// One row of a series.
///
/// A collected sample has a non-zero `unix_nanosecond`; merged and interpolated samples carry
/// zero there so they can be told apart from real measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub unix_nanosecond: i64,
    pub unix_second: i64,
    pub proc: ProcStat,
    pub load_avg: LoadAvg,
    pub disk: DiskStat,
    pub disk_delta: DiskDelta,
    pub net: NetStat,
    pub net_delta: NetDelta,
    #[serde(default)]
    pub extra: Vec<u8>,
}

impl Sample {
    /// Empty sample captured at `unix_nanosecond`; the second bucket is derived by truncation.
    pub fn at(unix_nanosecond: i64) -> Self {
        Self {
            unix_nanosecond,
            unix_second: unix_nanosecond / NANOS_PER_SECOND,
            ..Default::default()
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.unix_nanosecond == 0
    }
}
