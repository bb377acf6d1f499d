//! Data module - CSV loading, category tables, and record filtering

pub mod categories;
pub mod filter;
mod loader;

pub use categories::{CategoryLabel, Dimension, COLLEGE_COL, TERM_COL};
pub use loader::{DataLoader, LoaderError};
