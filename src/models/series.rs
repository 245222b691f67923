// Ordered samples for one pid / disk / interface combination.

use serde::{Deserialize, Serialize};

use super::{DiskDelta, NetDelta, Sample};
use crate::humanize;

const SECTOR_BYTES: u64 = 512;
const BYTES_PER_MEGABYTE: u64 = 1_000_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub pid: i64,
    pub disk_device: String,
    pub network_interface: String,
    pub min_unix_second: i64,
    pub max_unix_second: i64,
    pub rows: Vec<Sample>,
}

impl Series {
    pub fn new(pid: i64, disk_device: &str, network_interface: &str) -> Self {
        Self {
            pid,
            disk_device: disk_device.to_string(),
            network_interface: network_interface.to_string(),
            ..Default::default()
        }
    }

    /// Appends a collected sample, filling its delta groups from the previously appended row.
    /// The first row gets zero deltas. Counter resets saturate to zero.
    pub fn push(&mut self, mut sample: Sample) {
        match self.rows.last() {
            Some(prev) => {
                sample.disk_delta = disk_delta(prev, &sample);
                sample.net_delta = net_delta(prev, &sample);
            }
            None => {
                sample.disk_delta = DiskDelta::default();
                sample.net_delta = net_delta(&sample, &sample);
            }
        }
        self.track_bounds(sample.unix_second);
        self.rows.push(sample);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Recomputes min/max second from the rows.
    pub fn refresh_bounds(&mut self) {
        self.min_unix_second = self.rows.iter().map(|s| s.unix_second).min().unwrap_or(0);
        self.max_unix_second = self.rows.iter().map(|s| s.unix_second).max().unwrap_or(0);
    }

    /// Sorts by second bucket, then by capture instant within a bucket.
    pub fn sort(&mut self) {
        self.rows.sort_by_key(|s| (s.unix_second, s.unix_nanosecond));
    }

    /// Same subject, no rows.
    pub fn empty_like(&self) -> Self {
        Self::new(self.pid, &self.disk_device, &self.network_interface)
    }

    fn track_bounds(&mut self, second: i64) {
        if self.rows.is_empty() {
            self.min_unix_second = second;
            self.max_unix_second = second;
        } else {
            self.min_unix_second = self.min_unix_second.min(second);
            self.max_unix_second = self.max_unix_second.max(second);
        }
    }
}

fn disk_delta(prev: &Sample, cur: &Sample) -> DiskDelta {
    let sectors_read_delta = cur.disk.sectors_read.saturating_sub(prev.disk.sectors_read);
    let sectors_written_delta = cur
        .disk
        .sectors_written
        .saturating_sub(prev.disk.sectors_written);
    let read_bytes_delta = sectors_read_delta * SECTOR_BYTES;
    let write_bytes_delta = sectors_written_delta * SECTOR_BYTES;
    DiskDelta {
        reads_completed_delta: cur
            .disk
            .reads_completed
            .saturating_sub(prev.disk.reads_completed),
        sectors_read_delta,
        writes_completed_delta: cur
            .disk
            .writes_completed
            .saturating_sub(prev.disk.writes_completed),
        sectors_written_delta,
        read_bytes_delta,
        read_megabytes_delta: read_bytes_delta / BYTES_PER_MEGABYTE,
        write_bytes_delta,
        write_megabytes_delta: write_bytes_delta / BYTES_PER_MEGABYTE,
    }
}

fn net_delta(prev: &Sample, cur: &Sample) -> NetDelta {
    let receive_bytes_num_delta = cur
        .net
        .receive_bytes_num
        .saturating_sub(prev.net.receive_bytes_num);
    let transmit_bytes_num_delta = cur
        .net
        .transmit_bytes_num
        .saturating_sub(prev.net.transmit_bytes_num);
    NetDelta {
        receive_bytes_delta: humanize::bytes(receive_bytes_num_delta),
        receive_packets_delta: cur
            .net
            .receive_packets
            .saturating_sub(prev.net.receive_packets),
        transmit_bytes_delta: humanize::bytes(transmit_bytes_num_delta),
        transmit_packets_delta: cur
            .net
            .transmit_packets
            .saturating_sub(prev.net.transmit_packets),
        receive_bytes_num_delta,
        transmit_bytes_num_delta,
    }
}
