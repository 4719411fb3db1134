//! Fixed-column reading and rewriting of PDB coordinate records.
//!
//! Lines are never parsed into an intermediate structure model. The [`scanner`]
//! reads fields straight out of the columns described in [`layout`], and the
//! [`rewriter`] produces new files by splicing single columns while copying
//! every other byte verbatim.

pub mod error;
pub mod layout;
pub mod rewriter;
pub mod scanner;

pub use error::RecordError;
