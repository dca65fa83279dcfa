//! Reconciles a ranked trending feed against a local movie catalog.

pub mod distance;
pub mod matcher;

pub use distance::levenshtein;
pub use matcher::{reconcile, scan_window, MAX_EDIT_DISTANCE, MAX_YEAR_DELTA, OVERSAMPLE_FACTOR};
