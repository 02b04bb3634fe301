//! Table processing logic.
//!
//! This module contains the client-side row handling shared by every table:
//! - [`sort`] - Stable sorting and comparator construction
//! - [`filter`] - Quickplay server browser filters

mod filter;
mod sort;

// Re-export public functions
pub use filter::{filter_servers, ServerFilters};
pub use sort::{compare, stable_sort, Order};
