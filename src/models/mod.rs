//! Typed models for the FlatQube indexer APIs.
//!
//! The swap indexer speaks camelCase JSON with decimals as strings; the
//! farming indexer mostly speaks snake_case. Each module maps one entity
//! family onto domain field names. Unknown wire fields are ignored so new
//! service fields never break parsing.

pub mod currency;
pub mod farming;
pub mod pair;
