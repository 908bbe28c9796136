// src/config.rs
use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Run parameters for the aggregation pipelines.
///
/// The defaults mirror the conventional registry layout: company master and
/// postal lookup under `data/`, chart data under `plots/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Company master registry CSV.
    pub registry: PathBuf,
    /// Postal-code → district lookup CSV.
    pub postal_index: PathBuf,
    /// Field delimiter for both inputs (single ASCII character).
    pub delimiter: char,
    /// First year of the category ranking range (inclusive).
    pub start_year: i32,
    /// Last year of the range; the current year when omitted.
    pub end_year: Option<i32>,
    /// Categories kept per year.
    pub top_n: usize,
    /// Target year for district attribution.
    pub district_year: String,
    /// Chart-data output directory, created on demand.
    pub out_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            registry: PathBuf::from("data/COMPANY_MASTER.csv"),
            postal_index: PathBuf::from("data/zipcode_district.csv"),
            delimiter: ',',
            start_year: 2015,
            end_year: None,
            top_n: 5,
            district_year: "2015".to_string(),
            out_dir: PathBuf::from("plots"),
        }
    }
}

impl RunConfig {
    /// Load from a YAML file; keys left out fall back to the defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Inclusive upper bound of the category year range.
    pub fn end_year(&self) -> i32 {
        self.end_year.unwrap_or_else(|| Utc::now().year())
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}
