//! Load JSON records, filter them with AND/OR criteria, keep a subset of
//! columns and export the result as CSV.

pub mod config;
pub mod data;
pub mod session;

pub use config::SieveConfig;
pub use session::{FilteredView, Session};
