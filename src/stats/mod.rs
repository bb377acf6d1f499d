//! Stats module - aggregation, share differences, and year-over-year trends

mod aggregator;
mod differ;
mod trend;

pub use aggregator::{AggregatedBucket, Aggregator};
pub use differ::{Differ, DifferenceResult};
pub use trend::{Trend, TrendSeries};

#[cfg(test)]
mod pipeline_tests {
    use super::*;
    use crate::data::categories::Dimension;
    use crate::data::filter;
    use polars::prelude::*;
    use std::io::Cursor;

    const CSV: &str = "\
Term,College Name,Men,Women,Unknown,Caucasian,Asian American,African American,Hispanic,Native American,Hawaiian/Pacific Isl,Multiracial,International,Unknown.1
2013,Engineering,100,50,0,80,30,10,15,2,1,5,6,1
2013,Science,30,30,0,25,10,5,10,1,0,3,5,1
2018,Engineering,120,70,1,85,40,12,25,2,1,8,16,2
2018,Science,35,45,0,30,15,6,15,1,1,4,7,1
";

    fn load() -> DataFrame {
        CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(CSV.as_bytes()))
            .finish()
            .unwrap()
    }

    #[test]
    fn csv_to_annotation_pipeline() {
        let df = load();

        let eng = filter::by_year_and_college(&df, 2013, Some("Engineering")).unwrap();
        let sci = filter::by_year_and_college(&df, 2013, Some("Science")).unwrap();

        let eng_gender = Aggregator::aggregate_dimension(&eng, Dimension::Gender);
        let sci_gender = Aggregator::aggregate_dimension(&sci, Dimension::Gender);
        assert_eq!(eng_gender.get("Men"), Some(100.0));
        assert_eq!(sci_gender.grand_total(), 60.0);

        // Engineering is 100/150 = 66.67% men, Science 30/60 = 50%
        let diff = Differ::difference(&eng_gender, &sci_gender);
        assert!((diff.get("Men").unwrap() - 16.67).abs() < 1e-9);
        assert!((diff.get("Women").unwrap() + 16.67).abs() < 1e-9);
        assert!((diff.get("Unknown").unwrap() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn race_buckets_cover_all_nine_categories() {
        let df = load();
        let eng = filter::by_year_and_college(&df, 2018, Some("Engineering")).unwrap();
        let bucket = Aggregator::aggregate_dimension(&eng, Dimension::Race);
        assert_eq!(bucket.len(), 9);
        assert_eq!(bucket.get("Unknown"), Some(2.0));
        assert_eq!(bucket.get("International"), Some(16.0));
        assert_eq!(bucket.grand_total(), 191.0);
    }

    #[test]
    fn trend_matches_per_year_aggregation() {
        let df = load();
        let trend = Trend::compute(&df, "Engineering", &[2013, 2018], Dimension::Gender).unwrap();
        let (label, men) = &trend.series[0];
        assert_eq!(label, "Men");
        assert_eq!(men, &[100.0, 120.0]);
    }
}
