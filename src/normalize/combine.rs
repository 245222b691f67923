// Merge samples that share one second bucket.

use super::NormalizeError;
use super::aggregate::FieldGroup;
use crate::models::{DiskDelta, DiskStat, LoadAvg, NetDelta, NetStat, ProcStat, Sample};

/// Collapses samples from one second bucket into a single row.
///
/// One sample is returned as is. For more, identity fields and the second bucket come from
/// the last sample, every numeric field is averaged (integer division for integer fields),
/// display strings are recomputed and `unix_nanosecond` is reset to zero. Cumulative
/// counters are averaged like gauges rather than summed or taking the latest value.
pub fn combine(samples: &[Sample]) -> Result<Sample, NormalizeError> {
    let last = match samples {
        [] => return Err(NormalizeError::EmptyCombine),
        [one] => return Ok(one.clone()),
        [.., last] => last,
    };

    Ok(Sample {
        unix_nanosecond: 0,
        unix_second: last.unix_second,
        proc: ProcStat::mean(&groups(samples, |s| &s.proc)),
        load_avg: LoadAvg::mean(&groups(samples, |s| &s.load_avg)),
        disk: DiskStat::mean(&groups(samples, |s| &s.disk)),
        disk_delta: DiskDelta::mean(&groups(samples, |s| &s.disk_delta)),
        net: NetStat::mean(&groups(samples, |s| &s.net)),
        net_delta: NetDelta::mean(&groups(samples, |s| &s.net_delta)),
        extra: last.extra.clone(),
    })
}

fn groups<'a, G>(samples: &'a [Sample], f: impl Fn(&'a Sample) -> &'a G) -> Vec<&'a G> {
    samples.iter().map(f).collect()
}
