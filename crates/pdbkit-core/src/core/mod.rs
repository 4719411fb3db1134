//! # Core Module
//!
//! File-level building blocks for working with PDB structure files without
//! building an in-memory structure model.
//!
//! - **Records** ([`records`]) - Column layout, read-only scanning and line rewriting
//! - **Transforms** ([`transform`]) - Rotation/translation of coordinate columns
//! - **Utilities** ([`utils`]) - Natural-sort keys and output-path derivation

pub mod records;
pub mod transform;
pub mod utils;
