// Linux-specific readers: /proc/loadavg, /proc/<pid>/status, /proc/<pid>/fd, /proc/diskstats,
// /proc/net/dev. Parsers take file contents so they can be tested off-host.

use crate::models::{DiskStat, LoadAvg, NetStat};

/// Counters from /proc/<pid>/status that sysinfo does not expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct StatusCounters {
    pub threads: u64,
    pub voluntary_ctxt_switches: u64,
    pub nonvoluntary_ctxt_switches: u64,
}

/// Format: `0.20 0.18 0.12 1/80 11206`.
pub(super) fn parse_loadavg(content: &str) -> Option<LoadAvg> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 5 {
        return None;
    }
    let (runnable, current) = parts[3].split_once('/')?;
    Some(LoadAvg {
        load_avg_1_minute: parts[0].parse().ok()?,
        load_avg_5_minute: parts[1].parse().ok()?,
        load_avg_15_minute: parts[2].parse().ok()?,
        runnable_kernel_scheduling_entities: runnable.parse().ok()?,
        current_kernel_scheduling_entities: current.parse().ok()?,
        last_pid: parts[4].parse().ok()?,
    })
}

pub(super) fn parse_status(content: &str) -> StatusCounters {
    let mut out = StatusCounters::default();
    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().parse::<u64>().unwrap_or(0);
        match key {
            "Threads" => out.threads = value,
            "voluntary_ctxt_switches" => out.voluntary_ctxt_switches = value,
            "nonvoluntary_ctxt_switches" => out.nonvoluntary_ctxt_switches = value,
            _ => {}
        }
    }
    out
}

/// Format: major minor name reads r_merged r_sectors r_time writes w_merged w_sectors w_time ...
/// Display fields are left empty.
pub(super) fn parse_diskstats(content: &str, device: &str) -> Option<DiskStat> {
    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 14 || parts[2] != device {
            continue;
        }
        let get_val = |idx: usize| -> u64 {
            parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0)
        };
        return Some(DiskStat {
            device: device.to_string(),
            reads_completed: get_val(3),
            sectors_read: get_val(5),
            time_spent_on_reading_ms: get_val(6),
            writes_completed: get_val(7),
            sectors_written: get_val(9),
            time_spent_on_writing_ms: get_val(10),
            ..Default::default()
        });
    }
    None
}

/// Format: `  eth0: rx_bytes rx_packets errs drop fifo frame compressed multicast tx_bytes tx_packets ...`
/// Display fields are left empty.
pub(super) fn parse_net_dev(content: &str, interface: &str) -> Option<NetStat> {
    for line in content.lines() {
        if line.contains('|') {
            continue;
        }
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        if name.trim() != interface {
            continue;
        }
        let values: Vec<&str> = rest.split_whitespace().collect();
        if values.len() < 16 {
            return None;
        }
        let get_val = |idx: usize| -> u64 {
            values.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0)
        };
        return Some(NetStat {
            interface: interface.to_string(),
            receive_bytes_num: get_val(0),
            receive_packets: get_val(1),
            transmit_bytes_num: get_val(8),
            transmit_packets: get_val(9),
            ..Default::default()
        });
    }
    None
}

pub(super) fn read_loadavg() -> Option<LoadAvg> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/loadavg").ok()?;
        return parse_loadavg(&content);
    }
    #[cfg(not(target_os = "linux"))]
    None
}

pub(super) fn read_status(pid: u32) -> StatusCounters {
    #[cfg(target_os = "linux")]
    {
        if let Ok(content) = std::fs::read_to_string(format!("/proc/{}/status", pid)) {
            return parse_status(&content);
        }
    }
    let _ = pid;
    StatusCounters::default()
}

/// Number of open file descriptors, 0 when /proc/<pid>/fd is not readable.
pub(super) fn count_fds(pid: u32) -> u64 {
    #[cfg(target_os = "linux")]
    {
        if let Ok(entries) = std::fs::read_dir(format!("/proc/{}/fd", pid)) {
            return entries.filter(|e| e.is_ok()).count() as u64;
        }
    }
    let _ = pid;
    0
}

pub(super) fn read_diskstats(device: &str) -> Option<DiskStat> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/diskstats").ok()?;
        return parse_diskstats(&content, device);
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = device;
        None
    }
}

pub(super) fn read_net_dev(interface: &str) -> Option<NetStat> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/net/dev").ok()?;
        return parse_net_dev(&content, interface);
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = interface;
        None
    }
}
