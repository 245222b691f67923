// Fill the seconds strictly between two known samples.

use super::NormalizeError;
use super::aggregate::FieldGroup;
use crate::models::{DiskDelta, DiskStat, LoadAvg, NetDelta, NetStat, ProcStat, Sample};

/// Synthesizes one sample per second strictly between `lower` and `upper`.
///
/// Numeric fields advance by `(upper - lower) / (gap + 1)` per second; identity fields and
/// the user blob are copied from `upper`. Adjacent seconds yield an empty vector.
pub fn interpolate(lower: &Sample, upper: &Sample) -> Result<Vec<Sample>, NormalizeError> {
    if upper.unix_second <= lower.unix_second {
        return Err(NormalizeError::InvalidOrdering {
            lower: lower.unix_second,
            upper: upper.unix_second,
        });
    }

    let steps = upper.unix_second - lower.unix_second;
    let filled = (1..steps)
        .map(|i| Sample {
            unix_nanosecond: 0,
            unix_second: lower.unix_second + i,
            proc: ProcStat::lerp(&lower.proc, &upper.proc, i, steps),
            load_avg: LoadAvg::lerp(&lower.load_avg, &upper.load_avg, i, steps),
            disk: DiskStat::lerp(&lower.disk, &upper.disk, i, steps),
            disk_delta: DiskDelta::lerp(&lower.disk_delta, &upper.disk_delta, i, steps),
            net: NetStat::lerp(&lower.net, &upper.net, i, steps),
            net_delta: NetDelta::lerp(&lower.net_delta, &upper.net_delta, i, steps),
            extra: upper.extra.clone(),
        })
        .collect();
    Ok(filled)
}
