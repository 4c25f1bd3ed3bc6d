//! FlatQube DEX statistics client library.
//!
//! Provides typed models and an async HTTP client for the FlatQube swap and
//! farming indexer APIs, plus the value-quantization, sorting, and console
//! table-rendering pipeline used by the `flatqube` CLI.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod fmt;
pub mod models;
pub mod quantize;
pub mod sort;

pub use error::{FlatQubeError, Result};
