//! # Core models and utilities for cttv.
//!
//! This crate holds what every other cttv crate needs: the [models::VariantRecord]
//! the join engine consumes, the [models::ClinvarRecord] input model with its
//! JSON-lines reader, and plain/gzip aware file readers and writers.
//!
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::*;
