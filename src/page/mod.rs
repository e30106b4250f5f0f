//! Page payload decoding
//!
//! A page payload is a JSON object of the form
//! `{ "num_docs": <int>, "docs": [ { "author": ..., "title": ..., ... } ] }`.

mod result;

pub use result::{Document, PageResult, PayloadError};

/// Documents the catalog returns per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 50;
