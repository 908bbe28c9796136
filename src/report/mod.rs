// src/report/mod.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::aggregate::YearlyTopCategories;

/// Write one `(label, count)` series as `<stem>.json` under `out_dir`.
///
/// The array order is the presentation order; consumers must not re-sort.
pub fn write_label_counts<S: AsRef<str>>(
    out_dir: &Path,
    stem: &str,
    pairs: &[(S, u64)],
) -> Result<PathBuf> {
    let rows: Vec<(&str, u64)> = pairs.iter().map(|(l, c)| (l.as_ref(), *c)).collect();
    write_json(out_dir, stem, &rows)
}

/// Write the top-categories-per-year aggregate as `<stem>.json`.
pub fn write_top_categories(
    out_dir: &Path,
    stem: &str,
    top: &YearlyTopCategories,
) -> Result<PathBuf> {
    #[derive(Serialize)]
    struct Payload<'a> {
        years: &'a [i32],
        per_year: Vec<(i32, &'a [(String, u64)])>,
    }
    let payload = Payload {
        years: &top.years,
        per_year: top.per_year.iter().map(|(&y, v)| (y, v.as_slice())).collect(),
    };
    write_json(out_dir, stem, &payload)
}

fn write_json<T: Serialize>(out_dir: &Path, stem: &str, value: &T) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let path = out_dir.join(format!("{}.json", stem));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "wrote chart data");
    Ok(path)
}
