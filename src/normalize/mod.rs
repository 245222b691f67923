// Gap normalization: one row per second between the first and last observed second.
// Same-second rows are merged with `combine`; missing seconds are bracketed through the
// boundary locator and filled with `interpolate`.

mod aggregate;
mod combine;
mod error;
mod interpolate;

pub use combine::combine;
pub use error::NormalizeError;
pub use interpolate::interpolate;

use std::collections::BTreeMap;

use crate::index::BoundaryLocator;
use crate::models::{Sample, Series};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Refuse to fill more than this many missing seconds.
    pub max_backfill_seconds: Option<u64>,
}

/// Returns a new series with exactly one row per second in `[min, max]`.
pub fn normalize(series: &Series) -> Result<Series, NormalizeError> {
    normalize_with(series, &NormalizeOptions::default())
}

#[instrument(skip_all, fields(pid = series.pid, rows = series.len()))]
pub fn normalize_with(
    series: &Series,
    options: &NormalizeOptions,
) -> Result<Series, NormalizeError> {
    if series.len() < 2 || spans_one_second(series) {
        return Ok(series.clone());
    }

    let mut sorted = series.rows.clone();
    sorted.sort_by_key(|s| (s.unix_second, s.unix_nanosecond));

    let mut buckets: BTreeMap<i64, Vec<Sample>> = BTreeMap::new();
    for s in sorted {
        buckets.entry(s.unix_second).or_default().push(s);
    }

    let mut merged_buckets: u64 = 0;
    let mut rows: Vec<Sample> = Vec::with_capacity(buckets.len());
    for bucket in buckets.into_values() {
        if bucket.len() > 1 {
            merged_buckets += 1;
            rows.push(combine(&bucket)?);
        } else {
            rows.extend(bucket);
        }
    }

    let mut out = series.empty_like();
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Ok(out);
    };
    let (min, max) = (first.unix_second, last.unix_second);
    let expected = (max - min + 1) as usize;

    if rows.len() == expected {
        if merged_buckets > 0 {
            debug!(merged_buckets, "merged duplicate seconds");
        }
        out.rows = rows;
        out.refresh_bounds();
        return Ok(out);
    }

    let missing = (expected - rows.len()) as u64;
    if let Some(limit) = options.max_backfill_seconds
        && missing > limit
    {
        return Err(NormalizeError::GapTooLarge { missing, limit });
    }

    let known: Vec<i64> = rows.iter().map(|s| s.unix_second).collect();
    let mut present = vec![false; expected];
    for &k in &known {
        present[(k - min) as usize] = true;
    }
    let mut locator = BoundaryLocator::new(&known);

    for second in min..=max {
        if present[(second - min) as usize] {
            continue;
        }
        let b = locator.find_boundary(second);
        if !b.has_lower() || !b.has_upper() {
            return Err(NormalizeError::UnboundedGap { second });
        }
        if b.is_exact() {
            continue;
        }

        let filled = interpolate(
            &rows[b.lower_index as usize],
            &rows[b.upper_index as usize],
        )?;
        for sample in filled {
            let slot = (sample.unix_second - min) as usize;
            if present[slot] {
                continue;
            }
            present[slot] = true;
            locator.add(sample.unix_second);
            rows.push(sample);
        }
    }

    debug!(merged_buckets, filled_seconds = missing, "normalized series");

    out.rows = rows;
    out.sort();
    out.refresh_bounds();
    Ok(out)
}

fn spans_one_second(series: &Series) -> bool {
    let mut seconds = series.rows.iter().map(|s| s.unix_second);
    match seconds.next() {
        Some(first) => seconds.all(|s| s == first),
        None => true,
    }
}
