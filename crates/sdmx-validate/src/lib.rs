//! Global compatibility filtering for SDG SDMX submissions.
//!
//! Series are checked against the global DSD codelists and the per-series
//! content constraint table. Compatible series are kept in a rebuilt
//! message; the rest are dropped and described by deduplicated, sorted
//! messages.

mod dedupe;
mod filter;
mod rows;
mod series;

pub use dedupe::dedupe_messages;
pub use filter::{FilterResult, GlobalFilter, filter_dataset};
pub use rows::{RowConstraintOutcome, constrain_rows};
pub use series::{Phase, Violation, check_content, check_structure, validate_series};
