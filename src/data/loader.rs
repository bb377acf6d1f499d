//! CSV Data Loader Module
//! Handles loading the enrollment summary CSV using Polars.

use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

use super::categories::COLLEGE_COL;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// Holds the loaded enrollment records. The frame is immutable once loaded;
/// every chart is recomputed from it.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file using Polars. Schema is inferred and malformed cells
    /// are tolerated; they surface as nulls and aggregate as zero.
    pub fn load_csv(&mut self, file_path: &str) -> Result<&DataFrame, LoaderError> {
        self.file_path = Some(PathBuf::from(file_path));

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Distinct college names, sorted, for the comparison dropdowns.
    pub fn colleges(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.column(COLLEGE_COL)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                let mut names: Vec<String> = (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect();
                names.sort();
                names
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set DataFrame directly (used for async loading).
    pub fn set_dataframe(&mut self, df: DataFrame, path: PathBuf) {
        self.df = Some(df);
        self.file_path = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn colleges_are_distinct_and_sorted() {
        let df = df!(
            "Term" => [2013i64, 2013, 2018, 2018],
            "College Name" => ["Science", "Engineering", "Science", "Business"],
        )
        .unwrap();
        let mut loader = DataLoader::new();
        loader.set_dataframe(df, PathBuf::from("test.csv"));

        assert_eq!(loader.colleges(), ["Business", "Engineering", "Science"]);
        assert_eq!(loader.row_count(), 4);
    }

    #[test]
    fn missing_file_surfaces_load_error() {
        let mut loader = DataLoader::new();
        let result = loader.load_csv("definitely/not/a/real/file.csv");
        assert!(matches!(result, Err(LoaderError::CsvError(_))));
    }

    #[test]
    fn empty_loader_has_no_data() {
        let loader = DataLoader::new();
        assert!(loader.dataframe().is_none());
        assert!(loader.colleges().is_empty());
        assert_eq!(loader.row_count(), 0);
    }
}
