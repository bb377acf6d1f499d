//! Category Aggregation
//! Sums per-category count columns over a filtered record set into an
//! ordered label -> total bucket.

use polars::prelude::*;

use crate::data::categories::{CategoryLabel, Dimension};

/// Ordered label -> total mapping produced by aggregation. One entry per
/// requested label, in request order; totals are non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedBucket {
    entries: Vec<(String, f64)>,
}

impl AggregatedBucket {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a bucket directly from label/total pairs, keeping input order.
    /// Duplicate labels overwrite (last write wins).
    pub fn from_entries(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut bucket = Self::new();
        for (label, total) in entries {
            bucket.insert(label, total);
        }
        bucket
    }

    /// Insert or overwrite the total for `label`.
    pub fn insert(&mut self, label: String, total: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| *l == label) {
            log::warn!("duplicate category label '{label}' overwrites earlier total");
            entry.1 = total;
        } else {
            self.entries.push((label, total));
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, total)| *total)
    }

    /// Sum of all totals in the bucket.
    pub fn grand_total(&self) -> f64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, total)| (l.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AggregatedBucket {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregates category counts out of a record frame.
pub struct Aggregator;

impl Aggregator {
    /// Sum the numeric interpretation of each labeled column over all rows.
    /// A column that is absent, or a cell that is null, empty, or
    /// non-numeric, contributes zero. Pure function of its inputs.
    pub fn aggregate(df: &DataFrame, labels: &[&str]) -> AggregatedBucket {
        let mut bucket = AggregatedBucket::new();
        for &label in labels {
            bucket.insert(label.to_string(), Self::column_sum(df, label));
        }
        bucket
    }

    /// Aggregate one demographic dimension, resolving each category to its
    /// CSV column (or its revision alias when the primary column is absent)
    /// and labeling the result with the display name.
    pub fn aggregate_dimension(df: &DataFrame, dimension: Dimension) -> AggregatedBucket {
        let mut bucket = AggregatedBucket::new();
        for category in dimension.labels() {
            let field = Self::resolve_field(df, category);
            bucket.insert(category.display.to_string(), Self::column_sum(df, field));
        }
        bucket
    }

    /// Pick the column a category is counted under for this data revision.
    fn resolve_field<'a>(df: &DataFrame, category: &'a CategoryLabel) -> &'a str {
        if df.column(category.field).is_ok() {
            return category.field;
        }
        match category.alias {
            Some(alias) if df.column(alias).is_ok() => alias,
            _ => category.field,
        }
    }

    /// Permissive numeric sum of one column. Non-strict cast to Float64
    /// turns unparseable cells into nulls, which are skipped.
    fn column_sum(df: &DataFrame, field: &str) -> f64 {
        let Ok(column) = df.column(field) else {
            return 0.0;
        };
        let Ok(as_f64) = column.cast(&DataType::Float64) else {
            return 0.0;
        };
        let Ok(ca) = as_f64.f64() else {
            return 0.0;
        };
        ca.into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample() -> DataFrame {
        df!(
            "Men" => [100i64, 20, 3],
            "Women" => [50i64, 10, 0],
            "Unknown" => [1i64, 0, 0],
        )
        .unwrap()
    }

    #[test]
    fn one_entry_per_label_in_input_order() {
        let bucket = Aggregator::aggregate(&sample(), &["Men", "Women", "Unknown"]);
        let labels: Vec<&str> = bucket.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["Men", "Women", "Unknown"]);
        assert_eq!(bucket.get("Men"), Some(123.0));
        assert_eq!(bucket.get("Women"), Some(60.0));
        assert_eq!(bucket.get("Unknown"), Some(1.0));
        assert_eq!(bucket.grand_total(), 184.0);
    }

    #[test]
    fn empty_record_set_yields_all_zero_bucket() {
        let empty = sample().head(Some(0));
        let bucket = Aggregator::aggregate(&empty, &["Men", "Women"]);
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.get("Men"), Some(0.0));
        assert_eq!(bucket.get("Women"), Some(0.0));
    }

    #[test]
    fn unknown_label_counts_as_zero() {
        let bucket = Aggregator::aggregate(&sample(), &["Men", "Nonexistent"]);
        assert_eq!(bucket.get("Nonexistent"), Some(0.0));
    }

    #[test]
    fn non_numeric_and_null_cells_count_as_zero() {
        let df = df!(
            "Men" => [Some("100"), Some("n/a"), None, Some("")],
        )
        .unwrap();
        let bucket = Aggregator::aggregate(&df, &["Men"]);
        assert_eq!(bucket.get("Men"), Some(100.0));
    }

    #[test]
    fn duplicate_labels_last_write_wins() {
        let bucket = Aggregator::aggregate(&sample(), &["Men", "Men"]);
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket.get("Men"), Some(123.0));
    }

    #[test]
    fn aggregate_is_idempotent() {
        let df = sample();
        let first = Aggregator::aggregate(&df, &["Men", "Women"]);
        let second = Aggregator::aggregate(&df, &["Men", "Women"]);
        assert_eq!(first, second);
    }

    #[test]
    fn dimension_aggregation_uses_alias_when_primary_column_missing() {
        let df = df!(
            "Caucasian" => [10i64],
            "Two or More" => [7i64],
        )
        .unwrap();
        let bucket = Aggregator::aggregate_dimension(&df, Dimension::Race);
        assert_eq!(bucket.get("Multiracial"), Some(7.0));
        assert_eq!(bucket.get("Caucasian"), Some(10.0));
        // absent columns still get an entry, at zero
        assert_eq!(bucket.get("Hispanic"), Some(0.0));
        assert_eq!(bucket.len(), Dimension::Race.labels().len());
    }

    #[test]
    fn dimension_aggregation_relabels_suffixed_unknown() {
        let df = df!(
            "Unknown.1" => [4i64],
        )
        .unwrap();
        let bucket = Aggregator::aggregate_dimension(&df, Dimension::Race);
        assert_eq!(bucket.get("Unknown"), Some(4.0));
        assert_eq!(bucket.get("Unknown.1"), None);
    }
}
