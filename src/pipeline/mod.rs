// src/pipeline/mod.rs
use anyhow::{bail, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, instrument};

use crate::aggregate::{self, CapitalBuckets, DistrictIndex, YearlyTopCategories};
use crate::config::RunConfig;
use crate::ingest::{self, RecordTable};

/// Registrations per year across the whole registry.
#[instrument(level = "info", skip(cfg))]
pub fn yearly_counts(cfg: &RunConfig) -> Result<BTreeMap<String, u64>> {
    let table = read_registry_checked(cfg)?;
    let counts = aggregate::count_by_year(&table);
    info!(years = counts.len(), "counted registrations per year");
    Ok(counts)
}

/// Top-N industrial categories per year over the configured range.
#[instrument(level = "info", skip(cfg))]
pub fn top_categories(cfg: &RunConfig) -> Result<YearlyTopCategories> {
    let table = read_registry_checked(cfg)?;
    let top =
        aggregate::top_categories_by_year(&table, cfg.start_year, cfg.end_year(), cfg.top_n);
    info!(years = top.years.len(), top_n = cfg.top_n, "ranked categories per year");
    Ok(top)
}

/// Authorized-capital histogram over the five fixed buckets.
#[instrument(level = "info", skip(cfg))]
pub fn capital_histogram(cfg: &RunConfig) -> Result<CapitalBuckets> {
    let table = read_registry_checked(cfg)?;
    let buckets = aggregate::bucket_capital(&table)?;
    info!(total = buckets.total(), "bucketed authorized capital");
    Ok(buckets)
}

/// Registrations per district for the configured target year.
///
/// Unlike the other pipelines this one has no existence pre-check; a missing
/// input surfaces as the reader's own error.
#[instrument(level = "info", skip(cfg))]
pub fn district_counts(cfg: &RunConfig) -> Result<HashMap<String, u64>> {
    let companies = ingest::read_table(&cfg.registry, cfg.delimiter_byte())?;
    let lookup = ingest::read_table(&cfg.postal_index, cfg.delimiter_byte())?;
    let index = DistrictIndex::from_table(&lookup);
    let counts = aggregate::count_by_district(&companies, &index, &cfg.district_year);
    info!(districts = counts.len(), year = %cfg.district_year, "attributed registrations to districts");
    Ok(counts)
}

fn read_registry_checked(cfg: &RunConfig) -> Result<RecordTable> {
    if !cfg.registry.exists() {
        bail!("registry file not found: {}", cfg.registry.display());
    }
    ingest::read_table(&cfg.registry, cfg.delimiter_byte())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_registry(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("COMPANY_MASTER.csv");
        let content = "\
CompanyRegistrationdate_date,CompanyIndustrialClassification,AuthorizedCapital,Registered_Office_Address
2015-04-01,Manufacturing,500000,\"12 Hill Road, Bandra 400 049\"
2015-07-20,Manufacturing,100000,\"pin 999 999 unknown\"
2016-02-11,Trading,20000000,\"MG Road 560001\"
";
        fs::write(&path, content).unwrap();
        path
    }

    fn write_postal_index(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("zipcode_district.csv");
        fs::write(&path, "ZipCode,District\n400049,Mumbai\n560001,Bengaluru\n").unwrap();
        path
    }

    fn config(dir: &Path) -> RunConfig {
        RunConfig {
            registry: write_registry(dir),
            postal_index: write_postal_index(dir),
            end_year: Some(2016),
            ..RunConfig::default()
        }
    }

    #[test]
    fn the_four_pipelines_agree_on_the_fixture() -> Result<()> {
        let dir = tempdir()?;
        let cfg = config(dir.path());

        let yearly = yearly_counts(&cfg)?;
        assert_eq!(yearly.get("2015"), Some(&2));
        assert_eq!(yearly.get("2016"), Some(&1));

        let top = top_categories(&cfg)?;
        assert_eq!(top.for_year(2015), [("Manufacturing".to_string(), 2)]);
        assert_eq!(top.for_year(2016), [("Trading".to_string(), 1)]);

        let buckets = capital_histogram(&cfg)?;
        assert_eq!(buckets.total(), 3);

        let districts = district_counts(&cfg)?;
        assert_eq!(districts.get("Mumbai"), Some(&1));
        // the 2015 sentinel-only record and the 2016 record contribute nothing
        assert_eq!(districts.len(), 1);
        Ok(())
    }

    #[test]
    fn missing_registry_is_pre_checked() {
        let dir = tempdir().unwrap();
        let cfg = RunConfig {
            registry: dir.path().join("absent.csv"),
            postal_index: write_postal_index(dir.path()),
            ..RunConfig::default()
        };
        let err = yearly_counts(&cfg).unwrap_err();
        assert!(err.to_string().contains("not found"));
        let err = capital_histogram(&cfg).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn district_pipeline_lets_the_reader_fail() {
        let dir = tempdir().unwrap();
        let cfg = RunConfig {
            registry: dir.path().join("absent.csv"),
            postal_index: write_postal_index(dir.path()),
            ..RunConfig::default()
        };
        let err = district_counts(&cfg).unwrap_err();
        assert!(err.to_string().contains("opening"));
    }
}
