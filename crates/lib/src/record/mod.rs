//! Content definition records.
//!
//! The record is the on-disk schema document of one tenant: the ordered list
//! of content types and the ordered list of reusable parts.

mod types;

pub use types::*;
