// Sample source: process stats via sysinfo, host counters via /proc

mod linux;

use crate::config::SubjectConfig;
use crate::humanize;
use crate::models::{DiskStat, NetStat, ProcStat, Sample};
use std::ffi::OsStr;
use std::sync::Mutex;
use sysinfo::{Pid, Process, ProcessesToUpdate, System};
use tracing::instrument;

/// Produces one fully populated sample for a fixed subject on demand.
///
/// Implementations may block; the worker calls them from `spawn_blocking`. Delta groups are
/// left at their defaults, `Series::push` fills them.
pub trait SampleSource: Send + Sync + 'static {
    fn sample(&self, unix_nanosecond: i64) -> anyhow::Result<Sample>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessSelector {
    Pid(u32),
    /// Lowest pid whose name matches exactly.
    Program(String),
}

pub struct SysinfoSource {
    sys: Mutex<System>,
    selector: ProcessSelector,
    disk_device: String,
    network_interface: String,
}

impl SysinfoSource {
    pub fn new(selector: ProcessSelector, disk_device: &str, network_interface: &str) -> Self {
        Self {
            sys: Mutex::new(System::new()),
            selector,
            disk_device: disk_device.to_string(),
            network_interface: network_interface.to_string(),
        }
    }

    pub fn from_config(subject: &SubjectConfig) -> anyhow::Result<Self> {
        let selector = match (subject.pid, &subject.program) {
            (Some(pid), None) => ProcessSelector::Pid(pid),
            (None, Some(program)) => ProcessSelector::Program(program.clone()),
            _ => anyhow::bail!("exactly one of subject.pid and subject.program must be set"),
        };
        Ok(Self::new(
            selector,
            &subject.disk_device,
            &subject.network_interface,
        ))
    }

    fn proc_stat(&self) -> anyhow::Result<ProcStat> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;

        let process: &Process = match &self.selector {
            ProcessSelector::Pid(pid) => {
                let pid = Pid::from_u32(*pid);
                sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                sys.process(pid)
                    .ok_or_else(|| anyhow::anyhow!("process {} not found", pid))?
            }
            ProcessSelector::Program(name) => {
                sys.refresh_processes(ProcessesToUpdate::All, true);
                sys.processes_by_exact_name(OsStr::new(name))
                    .min_by_key(|p| p.pid())
                    .ok_or_else(|| anyhow::anyhow!("no process named {:?}", name))?
            }
        };

        let pid = process.pid().as_u32();
        let status = linux::read_status(pid);
        let cpu_num = process.cpu_usage() as f64;
        let vm_rss_num = process.memory();
        let vm_size_num = process.virtual_memory();
        Ok(ProcStat {
            program: process.name().to_string_lossy().into_owned(),
            state: process.status().to_string(),
            pid: pid as i64,
            ppid: process.parent().map(|p| p.as_u32() as i64).unwrap_or(0),
            cpu: humanize::cpu_percent(cpu_num),
            vm_rss: humanize::bytes(vm_rss_num),
            vm_size: humanize::bytes(vm_size_num),
            fd: linux::count_fds(pid),
            threads: status.threads,
            voluntary_ctxt_switches: status.voluntary_ctxt_switches,
            nonvoluntary_ctxt_switches: status.nonvoluntary_ctxt_switches,
            cpu_num,
            vm_rss_num,
            vm_size_num,
        })
    }

    fn disk_stat(&self) -> DiskStat {
        let mut disk = linux::read_diskstats(&self.disk_device).unwrap_or_else(|| DiskStat {
            device: self.disk_device.clone(),
            ..Default::default()
        });
        disk.time_spent_on_reading = humanize::duration_ms(disk.time_spent_on_reading_ms);
        disk.time_spent_on_writing = humanize::duration_ms(disk.time_spent_on_writing_ms);
        disk
    }

    fn net_stat(&self) -> NetStat {
        let mut net = linux::read_net_dev(&self.network_interface).unwrap_or_else(|| NetStat {
            interface: self.network_interface.clone(),
            ..Default::default()
        });
        net.receive_bytes = humanize::bytes(net.receive_bytes_num);
        net.transmit_bytes = humanize::bytes(net.transmit_bytes_num);
        net
    }
}

impl SampleSource for SysinfoSource {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "sample"))]
    fn sample(&self, unix_nanosecond: i64) -> anyhow::Result<Sample> {
        let mut sample = Sample::at(unix_nanosecond);
        sample.proc = self.proc_stat()?;
        sample.load_avg = linux::read_loadavg().unwrap_or_default();
        sample.disk = self.disk_stat();
        sample.net = self.net_stat();
        Ok(sample)
    }
}
