//! Log file intake.
//!
//! Plays the role of the upload handler: checks the file before the
//! aggregator ever sees it and reports its own errors.

pub mod log_file;

pub use log_file::{open_log, source_name};
