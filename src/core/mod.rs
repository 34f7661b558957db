//! Core conversion pipeline: table model, column mapping, grouping,
//! validation and record construction.
//!
//! Everything here is independent of the spreadsheet reader and of the
//! XML serializer.

mod error;
pub mod fields;
mod grouping;
mod header;
mod invoice;
mod line_item;
mod table;
mod translate;
mod validation;
mod value;

pub use error::*;
pub use fields::{HeaderField, LineField};
pub use grouping::*;
pub use header::*;
pub use invoice::*;
pub use line_item::*;
pub use table::*;
pub use translate::*;
pub use validation::*;
pub use value::*;
