// CSV persistence for a series: one header row, then one row per sample in ascending second.
// The subject (pid, disk device, interface) is not stored separately; loading takes it from
// the first row.

mod row;

pub use row::HEADER;

use crate::models::Series;
use crate::normalize::{NormalizeOptions, normalize_with};
use std::io;
use std::path::Path;
use tracing::instrument;

#[instrument(skip(series), fields(repo = "series", operation = "save", rows = series.len()))]
pub fn save(path: &Path, series: &Series) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_to(file, series)
}

#[instrument(fields(repo = "series", operation = "load"))]
pub fn load(path: &Path) -> anyhow::Result<Series> {
    let file = std::fs::File::open(path)
        .map_err(|e| anyhow::anyhow!("open {}: {}", path.display(), e))?;
    read_from(file)
}

/// Loads `input`, normalizes it and saves the result to `output` (which may be `input`).
/// Nothing is written when normalization fails. Returns the row counts before and after.
#[instrument(skip(options), fields(repo = "series", operation = "normalize_file"))]
pub fn normalize_file(
    input: &Path,
    output: &Path,
    options: &NormalizeOptions,
) -> anyhow::Result<(usize, usize)> {
    let series = load(input)?;
    let normalized = normalize_with(&series, options)?;
    save(output, &normalized)?;
    Ok((series.len(), normalized.len()))
}

pub fn write_to<W: io::Write>(writer: W, series: &Series) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for sample in &series.rows {
        wtr.write_record(row::to_record(sample))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_from<R: io::Read>(reader: R) -> anyhow::Result<Series> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for (i, expected) in HEADER.iter().enumerate() {
        let got = headers.get(i).unwrap_or("");
        anyhow::ensure!(
            got == *expected,
            "unexpected header column {}: want {:?}, got {:?}",
            i,
            expected,
            got
        );
    }
    anyhow::ensure!(
        headers.len() == HEADER.len(),
        "unexpected header width: want {}, got {}",
        HEADER.len(),
        headers.len()
    );

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let sample =
            row::from_record(&record).map_err(|e| anyhow::anyhow!("row {}: {}", line + 1, e))?;
        rows.push(sample);
    }

    let mut series = match rows.first() {
        Some(first) => Series::new(first.proc.pid, &first.disk.device, &first.net.interface),
        None => Series::default(),
    };
    series.rows = rows;
    series.refresh_bounds();
    Ok(series)
}
