// Column layout of a series CSV and the conversion of one Sample to and from a record.

use crate::models::{DiskDelta, DiskStat, LoadAvg, NetDelta, NetStat, ProcStat, Sample};
use std::str::FromStr;

pub const HEADER: [&str; 53] = [
    "UNIX-NANOSECOND",
    "UNIX-SECOND",
    "PROGRAM",
    "STATE",
    "PID",
    "PPID",
    "CPU",
    "VMRSS",
    "VMSIZE",
    "FD",
    "THREADS",
    "VOLUNTARY-CTXT-SWITCHES",
    "NON-VOLUNTARY-CTXT-SWITCHES",
    "CPU-NUM",
    "VMRSS-NUM",
    "VMSIZE-NUM",
    "LOAD-AVERAGE-1-MINUTE",
    "LOAD-AVERAGE-5-MINUTE",
    "LOAD-AVERAGE-15-MINUTE",
    "RUNNABLE-KERNEL-SCHEDULING-ENTITIES",
    "CURRENT-KERNEL-SCHEDULING-ENTITIES",
    "LAST-PID",
    "DEVICE",
    "READS-COMPLETED",
    "SECTORS-READ",
    "TIME(READS)",
    "WRITES-COMPLETED",
    "SECTORS-WRITTEN",
    "TIME(WRITES)",
    "MILLISECONDS(READS)",
    "MILLISECONDS(WRITES)",
    "READS-COMPLETED-DELTA",
    "SECTORS-READ-DELTA",
    "WRITES-COMPLETED-DELTA",
    "SECTORS-WRITTEN-DELTA",
    "READ-BYTES-DELTA",
    "READ-MEGABYTES-DELTA",
    "WRITE-BYTES-DELTA",
    "WRITE-MEGABYTES-DELTA",
    "INTERFACE",
    "RECEIVE-BYTES",
    "RECEIVE-PACKETS",
    "TRANSMIT-BYTES",
    "TRANSMIT-PACKETS",
    "RECEIVE-BYTES-NUM",
    "TRANSMIT-BYTES-NUM",
    "RECEIVE-BYTES-DELTA",
    "RECEIVE-PACKETS-DELTA",
    "TRANSMIT-BYTES-DELTA",
    "TRANSMIT-PACKETS-DELTA",
    "RECEIVE-BYTES-NUM-DELTA",
    "TRANSMIT-BYTES-NUM-DELTA",
    "EXTRA",
];

pub(super) fn to_record(s: &Sample) -> Vec<String> {
    let p = &s.proc;
    let l = &s.load_avg;
    let d = &s.disk;
    let dd = &s.disk_delta;
    let n = &s.net;
    let nd = &s.net_delta;
    vec![
        s.unix_nanosecond.to_string(),
        s.unix_second.to_string(),
        p.program.clone(),
        p.state.clone(),
        p.pid.to_string(),
        p.ppid.to_string(),
        p.cpu.clone(),
        p.vm_rss.clone(),
        p.vm_size.clone(),
        p.fd.to_string(),
        p.threads.to_string(),
        p.voluntary_ctxt_switches.to_string(),
        p.nonvoluntary_ctxt_switches.to_string(),
        p.cpu_num.to_string(),
        p.vm_rss_num.to_string(),
        p.vm_size_num.to_string(),
        l.load_avg_1_minute.to_string(),
        l.load_avg_5_minute.to_string(),
        l.load_avg_15_minute.to_string(),
        l.runnable_kernel_scheduling_entities.to_string(),
        l.current_kernel_scheduling_entities.to_string(),
        l.last_pid.to_string(),
        d.device.clone(),
        d.reads_completed.to_string(),
        d.sectors_read.to_string(),
        d.time_spent_on_reading.clone(),
        d.writes_completed.to_string(),
        d.sectors_written.to_string(),
        d.time_spent_on_writing.clone(),
        d.time_spent_on_reading_ms.to_string(),
        d.time_spent_on_writing_ms.to_string(),
        dd.reads_completed_delta.to_string(),
        dd.sectors_read_delta.to_string(),
        dd.writes_completed_delta.to_string(),
        dd.sectors_written_delta.to_string(),
        dd.read_bytes_delta.to_string(),
        dd.read_megabytes_delta.to_string(),
        dd.write_bytes_delta.to_string(),
        dd.write_megabytes_delta.to_string(),
        n.interface.clone(),
        n.receive_bytes.clone(),
        n.receive_packets.to_string(),
        n.transmit_bytes.clone(),
        n.transmit_packets.to_string(),
        n.receive_bytes_num.to_string(),
        n.transmit_bytes_num.to_string(),
        nd.receive_bytes_delta.clone(),
        nd.receive_packets_delta.to_string(),
        nd.transmit_bytes_delta.clone(),
        nd.transmit_packets_delta.to_string(),
        nd.receive_bytes_num_delta.to_string(),
        nd.transmit_bytes_num_delta.to_string(),
        String::from_utf8_lossy(&s.extra).into_owned(),
    ]
}

/// Reads columns left to right, reporting the column name on a parse failure.
struct Columns<'a> {
    record: &'a csv::StringRecord,
    at: usize,
}

impl<'a> Columns<'a> {
    fn text(&mut self) -> anyhow::Result<String> {
        let i = self.at;
        self.at += 1;
        self.record
            .get(i)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("missing column {}", HEADER[i]))
    }

    fn num<T>(&mut self) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let i = self.at;
        let raw = self.text()?;
        raw.parse::<T>()
            .map_err(|e| anyhow::anyhow!("column {}: {:?}: {}", HEADER[i], raw, e))
    }
}

pub(super) fn from_record(record: &csv::StringRecord) -> anyhow::Result<Sample> {
    anyhow::ensure!(
        record.len() == HEADER.len(),
        "expected {} columns, got {}",
        HEADER.len(),
        record.len()
    );
    let mut c = Columns { record, at: 0 };
    Ok(Sample {
        unix_nanosecond: c.num()?,
        unix_second: c.num()?,
        proc: ProcStat {
            program: c.text()?,
            state: c.text()?,
            pid: c.num()?,
            ppid: c.num()?,
            cpu: c.text()?,
            vm_rss: c.text()?,
            vm_size: c.text()?,
            fd: c.num()?,
            threads: c.num()?,
            voluntary_ctxt_switches: c.num()?,
            nonvoluntary_ctxt_switches: c.num()?,
            cpu_num: c.num()?,
            vm_rss_num: c.num()?,
            vm_size_num: c.num()?,
        },
        load_avg: LoadAvg {
            load_avg_1_minute: c.num()?,
            load_avg_5_minute: c.num()?,
            load_avg_15_minute: c.num()?,
            runnable_kernel_scheduling_entities: c.num()?,
            current_kernel_scheduling_entities: c.num()?,
            last_pid: c.num()?,
        },
        disk: DiskStat {
            device: c.text()?,
            reads_completed: c.num()?,
            sectors_read: c.num()?,
            time_spent_on_reading: c.text()?,
            writes_completed: c.num()?,
            sectors_written: c.num()?,
            time_spent_on_writing: c.text()?,
            time_spent_on_reading_ms: c.num()?,
            time_spent_on_writing_ms: c.num()?,
        },
        disk_delta: DiskDelta {
            reads_completed_delta: c.num()?,
            sectors_read_delta: c.num()?,
            writes_completed_delta: c.num()?,
            sectors_written_delta: c.num()?,
            read_bytes_delta: c.num()?,
            read_megabytes_delta: c.num()?,
            write_bytes_delta: c.num()?,
            write_megabytes_delta: c.num()?,
        },
        net: NetStat {
            interface: c.text()?,
            receive_bytes: c.text()?,
            receive_packets: c.num()?,
            transmit_bytes: c.text()?,
            transmit_packets: c.num()?,
            receive_bytes_num: c.num()?,
            transmit_bytes_num: c.num()?,
        },
        net_delta: NetDelta {
            receive_bytes_delta: c.text()?,
            receive_packets_delta: c.num()?,
            transmit_bytes_delta: c.text()?,
            transmit_packets_delta: c.num()?,
            receive_bytes_num_delta: c.num()?,
            transmit_bytes_num_delta: c.num()?,
        },
        extra: c.text()?.into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_width_matches_header() {
        assert_eq!(to_record(&Sample::default()).len(), HEADER.len());
    }

    #[test]
    fn parse_error_names_the_column() {
        let mut fields = to_record(&Sample::default());
        fields[4] = "not-a-pid".into();
        let record = csv::StringRecord::from(fields);
        let err = from_record(&record).unwrap_err();
        assert!(err.to_string().contains("PID"), "{}", err);
    }
}
