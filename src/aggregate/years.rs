use std::collections::BTreeMap;

use crate::aggregate::REGISTRATION_DATE;
use crate::ingest::RecordTable;

/// Count registrations per year.
///
/// The year is the first four characters of the registration date and must be
/// all ASCII digits; records with a missing, empty or malformed date are
/// skipped. The `BTreeMap` keeps the keys in ascending year order.
pub fn count_by_year(table: &RecordTable) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for record in table.records() {
        let date = match record.get(REGISTRATION_DATE) {
            Some(d) => d,
            None => continue,
        };
        let year = match date.get(..4) {
            Some(y) => y,
            None => continue,
        };
        if year.chars().all(|c| c.is_ascii_digit()) {
            *counts.entry(year.to_string()).or_insert(0) += 1;
        }
    }
    counts
}
