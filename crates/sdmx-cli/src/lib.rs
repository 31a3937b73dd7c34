//! Library components of the `sdmx-filter` binary.

pub mod logging;
pub mod output;
