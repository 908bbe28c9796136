use anyhow::{bail, Context, Result};

use crate::aggregate::AUTHORIZED_CAPITAL;
use crate::ingest::RecordTable;

/// Bucket labels in presentation order. L = lakh (1e5), Cr = crore (1e7).
pub const BUCKET_LABELS: [&str; 5] = ["<= 1L", "1L to 10L", "10L to 1Cr", "1Cr to 10Cr", "> 10Cr"];

/// Registration counts over the five authorized-capital ranges.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapitalBuckets {
    counts: [u64; 5],
}

impl CapitalBuckets {
    /// `(label, count)` pairs in bucket order.
    pub fn labelled(&self) -> Vec<(&'static str, u64)> {
        BUCKET_LABELS.iter().zip(self.counts).map(|(&l, c)| (l, c)).collect()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Classify every record's authorized capital into exactly one bucket.
///
/// Strict by contract: a missing or non-numeric capital value fails the
/// whole batch rather than skipping the row.
pub fn bucket_capital(table: &RecordTable) -> Result<CapitalBuckets> {
    let mut buckets = CapitalBuckets::default();
    for (idx, record) in table.records().enumerate() {
        let raw = match record.get(AUTHORIZED_CAPITAL) {
            Some(v) => v,
            None => bail!("record {} has no {} field", idx, AUTHORIZED_CAPITAL),
        };
        let cap: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("record {}: bad authorized capital {:?}", idx, raw))?;

        // inclusive upper bounds, first match wins
        let slot = if cap <= 100_000.0 {
            0
        } else if cap <= 1_000_000.0 {
            1
        } else if cap <= 10_000_000.0 {
            2
        } else if cap <= 100_000_000.0 {
            3
        } else {
            4
        };
        buckets.counts[slot] += 1;
    }
    Ok(buckets)
}
