// Display strings recomputed from numeric fields after merge or interpolation.

use chrono::TimeDelta;

const SI_SIZES: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

const DAY_SECS: i64 = 24 * 3600;
const WEEK_SECS: i64 = 7 * DAY_SECS;
const MONTH_SECS: i64 = 30 * DAY_SECS;
const YEAR_SECS: i64 = 12 * MONTH_SECS;
const LONG_TIME_SECS: i64 = 37 * YEAR_SECS;

/// SI byte count, e.g. `82 MB`, `1.5 kB`, `7 B`.
pub fn bytes(n: u64) -> String {
    if n < 10 {
        return format!("{} B", n);
    }
    let mut idx = 0;
    let mut scaled = n;
    while scaled >= 1000 && idx < SI_SIZES.len() - 1 {
        scaled /= 1000;
        idx += 1;
    }
    let mut val = ((n as f64) / 1000f64.powi(idx as i32) * 10.0 + 0.5).floor() / 10.0;
    // 999.5 and up would print as 1000
    if val >= 999.5 && idx < SI_SIZES.len() - 1 {
        idx += 1;
        val /= 1000.0;
    }
    if val < 10.0 {
        format!("{:.1} {}", val, SI_SIZES[idx])
    } else {
        format!("{:.0} {}", val, SI_SIZES[idx])
    }
}

/// CPU percentage as shown in the `cpu` column.
pub fn cpu_percent(v: f64) -> String {
    format!("{:.2} %", v)
}

/// Relative duration of `ms` milliseconds, e.g. `0 seconds`, `3 minutes`, `1 day`.
pub fn duration_ms(ms: u64) -> String {
    let delta = TimeDelta::milliseconds(ms.min(i64::MAX as u64) as i64);
    let secs = delta.num_seconds();

    // (upper bound exclusive, unit seconds, singular text); unit 0 means fixed text
    let ladder: [(i64, i64, &str); 16] = [
        (1, 0, "0 seconds"),
        (2, 0, "1 second"),
        (60, 1, "seconds"),
        (120, 0, "1 minute"),
        (3600, 60, "minutes"),
        (2 * 3600, 0, "1 hour"),
        (DAY_SECS, 3600, "hours"),
        (2 * DAY_SECS, 0, "1 day"),
        (WEEK_SECS, DAY_SECS, "days"),
        (2 * WEEK_SECS, 0, "1 week"),
        (MONTH_SECS, WEEK_SECS, "weeks"),
        (2 * MONTH_SECS, 0, "1 month"),
        (YEAR_SECS, MONTH_SECS, "months"),
        (18 * MONTH_SECS, 0, "1 year"),
        (2 * YEAR_SECS, 0, "2 years"),
        (LONG_TIME_SECS, YEAR_SECS, "years"),
    ];
    for (limit, unit, text) in ladder {
        if secs < limit {
            return if unit == 0 {
                text.to_string()
            } else {
                format!("{} {}", secs / unit, text)
            };
        }
    }
    "a long while".to_string()
}
