//! Record Filtering
//! Equality filters on term and college name, feeding the aggregation
//! pipeline. Pure: the input frame is never mutated.

use polars::prelude::*;

use super::categories::{COLLEGE_COL, TERM_COL};

/// Keep the rows for `year`, optionally narrowed to one college.
pub fn by_year_and_college(
    df: &DataFrame,
    year: i32,
    college: Option<&str>,
) -> PolarsResult<DataFrame> {
    let mut lf = df.clone().lazy().filter(col(TERM_COL).eq(lit(year)));
    if let Some(name) = college {
        lf = lf.filter(col(COLLEGE_COL).eq(lit(name)));
    }
    lf.collect()
}

/// Keep the rows for one college across any term.
pub fn by_college(df: &DataFrame, college: &str) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(col(COLLEGE_COL).eq(lit(college)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample() -> DataFrame {
        df!(
            "Term" => [2013i64, 2013, 2018, 2018, 2023],
            "College Name" => ["Engineering", "Science", "Engineering", "Science", "Engineering"],
            "Men" => [100i64, 40, 120, 50, 140],
        )
        .unwrap()
    }

    #[test]
    fn filters_by_year() {
        let out = by_year_and_college(&sample(), 2018, None).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn filters_by_year_and_college() {
        let out = by_year_and_college(&sample(), 2018, Some("Science")).unwrap();
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn unmatched_year_yields_empty_frame() {
        let out = by_year_and_college(&sample(), 1999, None).unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn filter_order_is_commutative() {
        let df = sample();
        // year then college
        let a = by_year_and_college(&df, 2013, Some("Engineering")).unwrap();
        // college then year
        let by_college_first = by_college(&df, "Engineering").unwrap();
        let b = by_year_and_college(&by_college_first, 2013, None).unwrap();
        assert!(a.equals(&b));
    }
}
