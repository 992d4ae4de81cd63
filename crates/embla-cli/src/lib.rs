//! Library components of the `embla` command-line tool.

pub mod logging;
pub mod report;
