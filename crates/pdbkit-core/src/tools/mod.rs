//! Invocation of external record-normalization tools.
//!
//! The operations in [`ops`] only talk to the [`LineNormalizer`] trait, so the
//! process-based [`SubprocessNormalizer`] can be replaced by another implementation
//! without touching callers. [`ToolChain`] runs several tools as one pipeline.

pub mod chain;
pub mod error;
pub mod normalizer;
pub mod ops;

pub use chain::ToolChain;
pub use error::ToolError;
pub use normalizer::{CommandSpec, LineNormalizer, SubprocessNormalizer};
pub use ops::{delocc_pdb, tidy};
