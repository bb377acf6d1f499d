//! Share Difference Computation
//! Percentage-point gaps between two colleges' within-group shares, the
//! numbers shown in the slide annotations.

use super::aggregator::AggregatedBucket;

/// Ordered label -> signed percentage-point difference, rounded to two
/// decimals. Carries one entry per label of the base bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceResult {
    entries: Vec<(String, f64)>,
}

impl DifferenceResult {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, diff)| *diff)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, diff)| (l.as_str(), *diff))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compares two aggregated buckets share-by-share.
pub struct Differ;

impl Differ {
    /// Per base label: `(share_base - share_comparison) * 100`, rounded to
    /// two decimals. Labels missing from the comparison count as zero;
    /// comparison labels missing from the base are ignored. When either
    /// grand total is zero that entity has no distribution to compare, so
    /// every difference is defined as 0.00 instead of NaN. Inputs are not
    /// modified and identical inputs always produce identical output.
    pub fn difference(base: &AggregatedBucket, comparison: &AggregatedBucket) -> DifferenceResult {
        let total_base = base.grand_total();
        let total_comparison = comparison.grand_total();

        if total_base == 0.0 || total_comparison == 0.0 {
            let entries = base.iter().map(|(label, _)| (label.to_string(), 0.0)).collect();
            return DifferenceResult { entries };
        }

        let entries = base
            .iter()
            .map(|(label, value)| {
                let share_base = value / total_base;
                let share_comparison = comparison.get(label).unwrap_or(0.0) / total_comparison;
                (
                    label.to_string(),
                    round2((share_base - share_comparison) * 100.0),
                )
            })
            .collect();

        DifferenceResult { entries }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(entries: &[(&str, f64)]) -> AggregatedBucket {
        AggregatedBucket::from_entries(
            entries.iter().map(|(l, v)| (l.to_string(), *v)),
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identical_buckets_differ_by_zero_everywhere() {
        let b = bucket(&[("Men", 120.0), ("Women", 80.0), ("Unknown", 5.0)]);
        let diff = Differ::difference(&b, &b);
        for (_, d) in diff.iter() {
            assert_close(d, 0.0);
        }
    }

    #[test]
    fn worked_example_rounds_to_two_decimals() {
        // base shares: Men 66.67%, Women 33.33%; comparison: 50% each
        let base = bucket(&[("Men", 100.0), ("Women", 50.0)]);
        let comparison = bucket(&[("Men", 30.0), ("Women", 30.0)]);
        let diff = Differ::difference(&base, &comparison);
        assert_close(diff.get("Men").unwrap(), 16.67);
        assert_close(diff.get("Women").unwrap(), -16.67);
    }

    #[test]
    fn zero_total_yields_zero_differences_not_nan() {
        let base = bucket(&[("Men", 0.0), ("Women", 0.0)]);
        let comparison = bucket(&[("Men", 10.0), ("Women", 10.0)]);

        let diff = Differ::difference(&base, &comparison);
        assert_close(diff.get("Men").unwrap(), 0.0);
        assert_close(diff.get("Women").unwrap(), 0.0);

        let diff = Differ::difference(&comparison, &base);
        assert_close(diff.get("Men").unwrap(), 0.0);

        let diff = Differ::difference(&base, &base);
        assert!(diff.iter().all(|(_, d)| d == 0.0 && d.is_finite()));
    }

    #[test]
    fn labels_missing_from_comparison_count_as_zero() {
        let base = bucket(&[("Men", 50.0), ("Women", 50.0)]);
        let comparison = bucket(&[("Men", 100.0)]);
        let diff = Differ::difference(&base, &comparison);
        // comparison is 100% Men, base is 50/50
        assert_close(diff.get("Men").unwrap(), -50.0);
        assert_close(diff.get("Women").unwrap(), 50.0);
    }

    #[test]
    fn comparison_labels_missing_from_base_are_ignored() {
        let base = bucket(&[("Men", 10.0)]);
        let comparison = bucket(&[("Men", 5.0), ("Women", 5.0)]);
        let diff = Differ::difference(&base, &comparison);
        assert_eq!(diff.len(), 1);
        assert!(diff.get("Women").is_none());
    }

    #[test]
    fn difference_is_deterministic() {
        let base = bucket(&[("Men", 33.0), ("Women", 67.0)]);
        let comparison = bucket(&[("Men", 41.0), ("Women", 59.0)]);
        let first = Differ::difference(&base, &comparison);
        let second = Differ::difference(&base, &comparison);
        assert_eq!(first, second);
    }
}
