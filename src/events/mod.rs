//! Client-side handling of backend event payloads.
//!
//! The backend has no query language for "last N rows" or for named date
//! windows, so those are provided here:
//!
//! - `table`: header/row split of a textual event table and tail-N slicing
//! - `range`: date-range filter arguments for the backend's `where` clause

mod range;
mod table;

pub use range::DateRange;
pub use table::{EventTable, HEADER_LINES, tail_rows};
