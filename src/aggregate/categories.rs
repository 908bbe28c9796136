use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::aggregate::{INDUSTRIAL_CLASSIFICATION, REGISTRATION_DATE};
use crate::ingest::RecordTable;

/// Top industrial categories per registration year over an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyTopCategories {
    /// year → top-N `(category, count)` pairs, descending by count. Every
    /// year of the requested range is present; a year with no data maps to
    /// an empty vec.
    pub per_year: BTreeMap<i32, Vec<(String, u64)>>,
    /// The full requested range in order, data or not.
    pub years: Vec<i32>,
}

impl YearlyTopCategories {
    /// Ranked categories for `year`; empty for years outside the range.
    pub fn for_year(&self, year: i32) -> &[(String, u64)] {
        self.per_year.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Rank the top `top_n` categories for each year in `[start_year, end_year]`.
///
/// A record needs both a date and a category, non-empty after trimming; the
/// year is the date's first four characters parsed as an integer, and records
/// that fail any of this are skipped. Count ties rank in first-seen order.
pub fn top_categories_by_year(
    table: &RecordTable,
    start_year: i32,
    end_year: i32,
    top_n: usize,
) -> YearlyTopCategories {
    // per category: (insertion sequence, count); the sequence settles ties
    let mut tallies: BTreeMap<i32, HashMap<String, (usize, u64)>> = BTreeMap::new();

    for record in table.records() {
        let (date, category) = match (
            record.get(REGISTRATION_DATE),
            record.get(INDUSTRIAL_CLASSIFICATION),
        ) {
            (Some(d), Some(c)) => (d.trim(), c.trim()),
            _ => continue,
        };
        if date.is_empty() || category.is_empty() {
            continue;
        }
        let year = match date.get(..4).and_then(|y| y.parse::<i32>().ok()) {
            Some(y) => y,
            None => continue,
        };
        if !(start_year..=end_year).contains(&year) {
            continue;
        }

        let counts = tallies.entry(year).or_default();
        let seq = counts.len();
        counts.entry(category.to_string()).or_insert((seq, 0)).1 += 1;
    }

    let years: Vec<i32> = (start_year..=end_year).collect();
    let mut per_year: BTreeMap<i32, Vec<(String, u64)>> =
        years.iter().map(|&y| (y, Vec::new())).collect();

    for (year, counts) in tallies {
        let mut ranked: Vec<(String, (usize, u64))> = counts.into_iter().collect();
        ranked.sort_by_key(|&(_, (seq, count))| (Reverse(count), seq));
        per_year.insert(
            year,
            ranked
                .into_iter()
                .take(top_n)
                .map(|(category, (_, count))| (category, count))
                .collect(),
        );
    }

    YearlyTopCategories { per_year, years }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> RecordTable {
        RecordTable::from_parts(
            vec![
                REGISTRATION_DATE.to_string(),
                INDUSTRIAL_CLASSIFICATION.to_string(),
            ],
            rows.iter()
                .map(|(d, c)| vec![d.to_string(), c.to_string()])
                .collect(),
        )
    }

    #[test]
    fn ranks_top_categories_descending() {
        let table = table(&[
            ("2015-04-01", "A"),
            ("2015-05-01", "B"),
            ("2015-06-01", "A"),
        ]);
        let top = top_categories_by_year(&table, 2015, 2015, 1);
        assert_eq!(top.for_year(2015), [("A".to_string(), 2)]);
    }

    #[test]
    fn count_ties_keep_first_seen_order() {
        let table = table(&[
            ("2020-01-01", "Zeta"),
            ("2020-02-01", "Alpha"),
            ("2020-03-01", "Zeta"),
            ("2020-04-01", "Alpha"),
        ]);
        let top = top_categories_by_year(&table, 2020, 2020, 2);
        assert_eq!(
            top.for_year(2020),
            [("Zeta".to_string(), 2), ("Alpha".to_string(), 2)]
        );
    }

    #[test]
    fn never_returns_more_than_top_n() {
        let table = table(&[
            ("2018-01-01", "A"),
            ("2018-01-01", "B"),
            ("2018-01-01", "C"),
        ]);
        let top = top_categories_by_year(&table, 2018, 2018, 2);
        assert_eq!(top.for_year(2018).len(), 2);
    }

    #[test]
    fn skips_blank_fields_and_years_outside_range() {
        let table = table(&[
            ("2015-04-01", "Manufacturing"),
            ("", "Manufacturing"),
            ("2015-04-01", "  "),
            ("2014-12-31", "Manufacturing"),
            ("bad date", "Manufacturing"),
        ]);
        let top = top_categories_by_year(&table, 2015, 2016, 5);
        assert_eq!(top.for_year(2015), [("Manufacturing".to_string(), 1)]);
        assert!(top.for_year(2016).is_empty());
    }

    #[test]
    fn returns_the_full_requested_range() {
        let table = table(&[("2016-01-01", "A")]);
        let top = top_categories_by_year(&table, 2015, 2018, 3);
        assert_eq!(top.years, [2015, 2016, 2017, 2018]);
        // empty years are still addressable
        assert!(top.per_year.get(&2017).unwrap().is_empty());
    }
}
