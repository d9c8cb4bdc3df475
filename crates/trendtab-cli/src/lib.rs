//! Library side of the `trendtab` command line tool.

pub mod ingest;
pub mod logging;
pub mod surface;
