#![deny(unsafe_code)]

pub mod codec;
pub mod csv;
pub mod error;
pub mod paths;
pub mod standards;
pub mod structure;

pub use crate::codec::{JsonCodec, MessageCodec};
pub use crate::csv::constraints::{
    load_constraint_store, load_constraint_table, parse_constraint_table,
};
pub use crate::csv::rows::{load_row_table, parse_row_table, write_row_table};
pub use crate::error::StandardsError;
pub use crate::paths::{StandardsPaths, standards_root};
pub use crate::standards::Standards;
pub use crate::structure::load_structure;
