//! # Output writers for cttv runs.
//!
//! Everything a finished run leaves on disk: the evidence strings as JSON
//! lines, the nsv id list, the unmapped trait counts and the zooma
//! provenance file. Paths ending in `.gz` are written gzipped.
//!
pub mod consts;
pub mod error;
pub mod report;
pub mod zooma;

// re-expose core functions
pub use consts::*;
pub use error::*;
pub use report::*;
pub use zooma::*;
