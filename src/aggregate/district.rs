use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::aggregate::{DISTRICT, OFFICE_ADDRESS, REGISTRATION_DATE, ZIP_CODE};
use crate::ingest::RecordTable;

/// Six digits, optionally split by a single space at the midpoint
/// ("400049" or "400 049").
static POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}\s?\d{3}\b").expect("invalid postal-code pattern"));

/// Reserved codes that never resolve to a district.
const SENTINEL_CODES: [&str; 2] = ["000000", "999999"];

/// Postal-code → district lookup built from the auxiliary table.
#[derive(Debug, Default)]
pub struct DistrictIndex {
    map: HashMap<String, String>,
}

impl DistrictIndex {
    /// Build the index. Keys are postal codes with space characters removed;
    /// a duplicate code overwrites the earlier district (last one wins).
    pub fn from_table(table: &RecordTable) -> Self {
        let mut map = HashMap::new();
        for record in table.records() {
            let (code, district) = match (record.get(ZIP_CODE), record.get(DISTRICT)) {
                (Some(z), Some(d)) => (z, d),
                _ => continue,
            };
            map.insert(code.replace(' ', ""), district.to_string());
        }
        debug!(codes = map.len(), "built district index");
        Self { map }
    }

    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.map.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Count registrations per district for the target year.
///
/// A record qualifies when its date literally starts with `year`. Candidate
/// codes are scanned in order of appearance in the address; sentinel codes
/// are ignored, and the first code known to the index claims the record.
/// At most one district per record, even when several codes appear.
pub fn count_by_district(
    table: &RecordTable,
    index: &DistrictIndex,
    year: &str,
) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in table.records() {
        let date = record.get(REGISTRATION_DATE).unwrap_or("");
        if !date.starts_with(year) {
            continue;
        }
        let address = record.get(OFFICE_ADDRESS).unwrap_or("");
        for m in POSTAL_CODE.find_iter(address) {
            let code = m.as_str().replace(' ', "");
            if SENTINEL_CODES.contains(&code.as_str()) {
                continue;
            }
            if let Some(district) = index.resolve(&code) {
                *counts.entry(district.to_string()).or_insert(0) += 1;
                break;
            }
        }
    }
    counts
}

/// The `limit` highest-count districts, descending; count ties go to the
/// lexically smaller name so the cut is deterministic.
pub fn top_districts(counts: &HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts.iter().map(|(d, &c)| (d.clone(), c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
