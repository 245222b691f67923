// Per-group aggregation policy: identity fields are carried, numeric fields are averaged or
// linearly interpolated, display strings are recomputed from their numeric field.

use crate::humanize;
use crate::models::{DiskDelta, DiskStat, LoadAvg, NetDelta, NetStat, ProcStat};

pub(crate) trait FieldGroup: Clone + Default {
    /// Averages numeric fields over `items`; identity fields come from the last item.
    fn mean(items: &[&Self]) -> Self;

    /// Value `step` of `steps` on the line from `lower` to `upper`; identity fields come
    /// from `upper`.
    fn lerp(lower: &Self, upper: &Self, step: i64, steps: i64) -> Self;

    fn refresh_display(&mut self) {}
}

impl FieldGroup for ProcStat {
    fn mean(items: &[&Self]) -> Self {
        let Some(last) = items.last() else {
            return Self::default();
        };
        let mut out = Self {
            program: last.program.clone(),
            state: last.state.clone(),
            pid: last.pid,
            ppid: last.ppid,
            fd: mean_u64(items, |p| p.fd),
            threads: mean_u64(items, |p| p.threads),
            voluntary_ctxt_switches: mean_u64(items, |p| p.voluntary_ctxt_switches),
            nonvoluntary_ctxt_switches: mean_u64(items, |p| p.nonvoluntary_ctxt_switches),
            cpu_num: mean_f64(items, |p| p.cpu_num),
            vm_rss_num: mean_u64(items, |p| p.vm_rss_num),
            vm_size_num: mean_u64(items, |p| p.vm_size_num),
            ..Default::default()
        };
        out.refresh_display();
        out
    }

    fn lerp(lower: &Self, upper: &Self, step: i64, steps: i64) -> Self {
        let mut out = Self {
            program: upper.program.clone(),
            state: upper.state.clone(),
            pid: upper.pid,
            ppid: upper.ppid,
            fd: lerp_u64(lower.fd, upper.fd, step, steps),
            threads: lerp_u64(lower.threads, upper.threads, step, steps),
            voluntary_ctxt_switches: lerp_u64(
                lower.voluntary_ctxt_switches,
                upper.voluntary_ctxt_switches,
                step,
                steps,
            ),
            nonvoluntary_ctxt_switches: lerp_u64(
                lower.nonvoluntary_ctxt_switches,
                upper.nonvoluntary_ctxt_switches,
                step,
                steps,
            ),
            cpu_num: lerp_f64(lower.cpu_num, upper.cpu_num, step, steps),
            vm_rss_num: lerp_u64(lower.vm_rss_num, upper.vm_rss_num, step, steps),
            vm_size_num: lerp_u64(lower.vm_size_num, upper.vm_size_num, step, steps),
            ..Default::default()
        };
        out.refresh_display();
        out
    }

    fn refresh_display(&mut self) {
        self.cpu = humanize::cpu_percent(self.cpu_num);
        self.vm_rss = humanize::bytes(self.vm_rss_num);
        self.vm_size = humanize::bytes(self.vm_size_num);
    }
}

impl FieldGroup for LoadAvg {
    fn mean(items: &[&Self]) -> Self {
        let Some(last) = items.last() else {
            return Self::default();
        };
        Self {
            load_avg_1_minute: mean_f64(items, |l| l.load_avg_1_minute),
            load_avg_5_minute: mean_f64(items, |l| l.load_avg_5_minute),
            load_avg_15_minute: mean_f64(items, |l| l.load_avg_15_minute),
            runnable_kernel_scheduling_entities: mean_i64(items, |l| {
                l.runnable_kernel_scheduling_entities
            }),
            current_kernel_scheduling_entities: mean_i64(items, |l| {
                l.current_kernel_scheduling_entities
            }),
            last_pid: last.last_pid,
        }
    }

    fn lerp(lower: &Self, upper: &Self, step: i64, steps: i64) -> Self {
        Self {
            load_avg_1_minute: lerp_f64(
                lower.load_avg_1_minute,
                upper.load_avg_1_minute,
                step,
                steps,
            ),
            load_avg_5_minute: lerp_f64(
                lower.load_avg_5_minute,
                upper.load_avg_5_minute,
                step,
                steps,
            ),
            load_avg_15_minute: lerp_f64(
                lower.load_avg_15_minute,
                upper.load_avg_15_minute,
                step,
                steps,
            ),
            runnable_kernel_scheduling_entities: lerp_i64(
                lower.runnable_kernel_scheduling_entities,
                upper.runnable_kernel_scheduling_entities,
                step,
                steps,
            ),
            current_kernel_scheduling_entities: lerp_i64(
                lower.current_kernel_scheduling_entities,
                upper.current_kernel_scheduling_entities,
                step,
                steps,
            ),
            last_pid: upper.last_pid,
        }
    }
}

impl FieldGroup for DiskStat {
    fn mean(items: &[&Self]) -> Self {
        let Some(last) = items.last() else {
            return Self::default();
        };
        let mut out = Self {
            device: last.device.clone(),
            reads_completed: mean_u64(items, |d| d.reads_completed),
            sectors_read: mean_u64(items, |d| d.sectors_read),
            writes_completed: mean_u64(items, |d| d.writes_completed),
            sectors_written: mean_u64(items, |d| d.sectors_written),
            time_spent_on_reading_ms: mean_u64(items, |d| d.time_spent_on_reading_ms),
            time_spent_on_writing_ms: mean_u64(items, |d| d.time_spent_on_writing_ms),
            ..Default::default()
        };
        out.refresh_display();
        out
    }

    fn lerp(lower: &Self, upper: &Self, step: i64, steps: i64) -> Self {
        let mut out = Self {
            device: upper.device.clone(),
            reads_completed: lerp_u64(lower.reads_completed, upper.reads_completed, step, steps),
            sectors_read: lerp_u64(lower.sectors_read, upper.sectors_read, step, steps),
            writes_completed: lerp_u64(
                lower.writes_completed,
                upper.writes_completed,
                step,
                steps,
            ),
            sectors_written: lerp_u64(lower.sectors_written, upper.sectors_written, step, steps),
            time_spent_on_reading_ms: lerp_u64(
                lower.time_spent_on_reading_ms,
                upper.time_spent_on_reading_ms,
                step,
                steps,
            ),
            time_spent_on_writing_ms: lerp_u64(
                lower.time_spent_on_writing_ms,
                upper.time_spent_on_writing_ms,
                step,
                steps,
            ),
            ..Default::default()
        };
        out.refresh_display();
        out
    }

    fn refresh_display(&mut self) {
        self.time_spent_on_reading = humanize::duration_ms(self.time_spent_on_reading_ms);
        self.time_spent_on_writing = humanize::duration_ms(self.time_spent_on_writing_ms);
    }
}

impl FieldGroup for DiskDelta {
    fn mean(items: &[&Self]) -> Self {
        Self {
            reads_completed_delta: mean_u64(items, |d| d.reads_completed_delta),
            sectors_read_delta: mean_u64(items, |d| d.sectors_read_delta),
            writes_completed_delta: mean_u64(items, |d| d.writes_completed_delta),
            sectors_written_delta: mean_u64(items, |d| d.sectors_written_delta),
            read_bytes_delta: mean_u64(items, |d| d.read_bytes_delta),
            read_megabytes_delta: mean_u64(items, |d| d.read_megabytes_delta),
            write_bytes_delta: mean_u64(items, |d| d.write_bytes_delta),
            write_megabytes_delta: mean_u64(items, |d| d.write_megabytes_delta),
        }
    }

    fn lerp(lower: &Self, upper: &Self, step: i64, steps: i64) -> Self {
        let l = |f: fn(&Self) -> u64| lerp_u64(f(lower), f(upper), step, steps);
        Self {
            reads_completed_delta: l(|d| d.reads_completed_delta),
            sectors_read_delta: l(|d| d.sectors_read_delta),
            writes_completed_delta: l(|d| d.writes_completed_delta),
            sectors_written_delta: l(|d| d.sectors_written_delta),
            read_bytes_delta: l(|d| d.read_bytes_delta),
            read_megabytes_delta: l(|d| d.read_megabytes_delta),
            write_bytes_delta: l(|d| d.write_bytes_delta),
            write_megabytes_delta: l(|d| d.write_megabytes_delta),
        }
    }
}

impl FieldGroup for NetStat {
    fn mean(items: &[&Self]) -> Self {
        let Some(last) = items.last() else {
            return Self::default();
        };
        let mut out = Self {
            interface: last.interface.clone(),
            receive_packets: mean_u64(items, |n| n.receive_packets),
            transmit_packets: mean_u64(items, |n| n.transmit_packets),
            receive_bytes_num: mean_u64(items, |n| n.receive_bytes_num),
            transmit_bytes_num: mean_u64(items, |n| n.transmit_bytes_num),
            ..Default::default()
        };
        out.refresh_display();
        out
    }

    fn lerp(lower: &Self, upper: &Self, step: i64, steps: i64) -> Self {
        let l = |f: fn(&Self) -> u64| lerp_u64(f(lower), f(upper), step, steps);
        let mut out = Self {
            interface: upper.interface.clone(),
            receive_packets: l(|n| n.receive_packets),
            transmit_packets: l(|n| n.transmit_packets),
            receive_bytes_num: l(|n| n.receive_bytes_num),
            transmit_bytes_num: l(|n| n.transmit_bytes_num),
            ..Default::default()
        };
        out.refresh_display();
        out
    }

    fn refresh_display(&mut self) {
        self.receive_bytes = humanize::bytes(self.receive_bytes_num);
        self.transmit_bytes = humanize::bytes(self.transmit_bytes_num);
    }
}

impl FieldGroup for NetDelta {
    fn mean(items: &[&Self]) -> Self {
        let mut out = Self {
            receive_packets_delta: mean_u64(items, |n| n.receive_packets_delta),
            transmit_packets_delta: mean_u64(items, |n| n.transmit_packets_delta),
            receive_bytes_num_delta: mean_u64(items, |n| n.receive_bytes_num_delta),
            transmit_bytes_num_delta: mean_u64(items, |n| n.transmit_bytes_num_delta),
            ..Default::default()
        };
        out.refresh_display();
        out
    }

    fn lerp(lower: &Self, upper: &Self, step: i64, steps: i64) -> Self {
        let l = |f: fn(&Self) -> u64| lerp_u64(f(lower), f(upper), step, steps);
        let mut out = Self {
            receive_packets_delta: l(|n| n.receive_packets_delta),
            transmit_packets_delta: l(|n| n.transmit_packets_delta),
            receive_bytes_num_delta: l(|n| n.receive_bytes_num_delta),
            transmit_bytes_num_delta: l(|n| n.transmit_bytes_num_delta),
            ..Default::default()
        };
        out.refresh_display();
        out
    }

    fn refresh_display(&mut self) {
        self.receive_bytes_delta = humanize::bytes(self.receive_bytes_num_delta);
        self.transmit_bytes_delta = humanize::bytes(self.transmit_bytes_num_delta);
    }
}

fn mean_f64<T>(items: &[&T], f: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(|&t| f(t)).sum::<f64>() / (items.len() as f64)
}

fn mean_i64<T>(items: &[&T], f: impl Fn(&T) -> i64) -> i64 {
    if items.is_empty() {
        return 0;
    }
    let sum: i128 = items.iter().map(|&t| f(t) as i128).sum();
    (sum / items.len() as i128) as i64
}

fn mean_u64<T>(items: &[&T], f: impl Fn(&T) -> u64) -> u64 {
    if items.is_empty() {
        return 0;
    }
    let sum: u128 = items.iter().map(|&t| f(t) as u128).sum();
    (sum / items.len() as u128) as u64
}

fn lerp_f64(lower: f64, upper: f64, step: i64, steps: i64) -> f64 {
    lower + (step as f64) * ((upper - lower) / steps as f64)
}

// Integer steps truncate toward zero, so a falling gauge does not wrap.
fn lerp_i64(lower: i64, upper: i64, step: i64, steps: i64) -> i64 {
    let delta = (upper as i128 - lower as i128) / steps as i128;
    (lower as i128 + step as i128 * delta).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

fn lerp_u64(lower: u64, upper: u64, step: i64, steps: i64) -> u64 {
    let delta = (upper as i128 - lower as i128) / steps as i128;
    (lower as i128 + step as i128 * delta).clamp(0, u64::MAX as i128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_u64_even_spacing() {
        assert_eq!(lerp_u64(10, 100, 1, 3), 40);
        assert_eq!(lerp_u64(10, 100, 2, 3), 70);
    }

    #[test]
    fn lerp_u64_decreasing_does_not_wrap() {
        assert_eq!(lerp_u64(100, 10, 1, 3), 70);
        assert_eq!(lerp_u64(100, 10, 2, 3), 40);
    }

    #[test]
    fn lerp_i64_truncates_toward_zero() {
        assert_eq!(lerp_i64(0, 10, 1, 3), 3);
        assert_eq!(lerp_i64(0, -10, 1, 3), -3);
    }

    #[test]
    fn mean_u64_uses_integer_division() {
        let v = [1u64, 2];
        let refs: Vec<&u64> = v.iter().collect();
        assert_eq!(mean_u64(&refs, |x| *x), 1);
    }
}
