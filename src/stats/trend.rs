//! Enrollment Trends
//! Per-year category totals for one college, feeding the conclusion
//! slide's line charts.

use polars::prelude::*;

use super::aggregator::Aggregator;
use crate::data::categories::Dimension;
use crate::data::filter;

/// Category totals for one college across a span of years. `series` keeps
/// the dimension's category order; each value vector is parallel to `years`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub college: String,
    pub dimension: Dimension,
    pub years: Vec<i32>,
    pub series: Vec<(String, Vec<f64>)>,
}

impl TrendSeries {
    /// Largest value across all series, for axis scaling.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .fold(0.0, f64::max)
    }
}

pub struct Trend;

impl Trend {
    /// Filter to each year in turn and aggregate the dimension. Years with
    /// no matching rows contribute zeros.
    pub fn compute(
        df: &DataFrame,
        college: &str,
        years: &[i32],
        dimension: Dimension,
    ) -> PolarsResult<TrendSeries> {
        let labels: Vec<String> = dimension
            .labels()
            .iter()
            .map(|l| l.display.to_string())
            .collect();
        let mut series: Vec<(String, Vec<f64>)> = labels
            .iter()
            .map(|l| (l.clone(), Vec::with_capacity(years.len())))
            .collect();

        for &year in years {
            let year_df = filter::by_year_and_college(df, year, Some(college))?;
            let bucket = Aggregator::aggregate_dimension(&year_df, dimension);
            for (label, values) in series.iter_mut() {
                values.push(bucket.get(label).unwrap_or(0.0));
            }
        }

        Ok(TrendSeries {
            college: college.to_string(),
            dimension,
            years: years.to_vec(),
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample() -> DataFrame {
        df!(
            "Term" => [2013i64, 2018, 2023, 2013],
            "College Name" => ["Engineering", "Engineering", "Engineering", "Science"],
            "Men" => [100i64, 120, 140, 40],
            "Women" => [50i64, 70, 90, 60],
            "Unknown" => [0i64, 1, 2, 0],
        )
        .unwrap()
    }

    #[test]
    fn series_follow_category_order_with_one_value_per_year() {
        let trend =
            Trend::compute(&sample(), "Engineering", &[2013, 2018, 2023], Dimension::Gender)
                .unwrap();
        assert_eq!(trend.years, [2013, 2018, 2023]);
        let labels: Vec<&str> = trend.series.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Men", "Women", "Unknown"]);
        assert_eq!(trend.series[0].1, [100.0, 120.0, 140.0]);
        assert_eq!(trend.series[1].1, [50.0, 70.0, 90.0]);
    }

    #[test]
    fn other_colleges_do_not_leak_into_the_series() {
        let trend = Trend::compute(&sample(), "Science", &[2013], Dimension::Gender).unwrap();
        assert_eq!(trend.series[0].1, [40.0]);
        assert_eq!(trend.series[1].1, [60.0]);
    }

    #[test]
    fn years_without_rows_contribute_zeros() {
        let trend =
            Trend::compute(&sample(), "Engineering", &[2013, 1999], Dimension::Gender).unwrap();
        assert_eq!(trend.series[0].1, [100.0, 0.0]);
        assert_eq!(trend.max_value(), 100.0);
    }
}
