//! # pdbkit Core Library
//!
//! Utilities for working directly on Protein Data Bank structure files: scanning and
//! rewriting fixed-column records, applying rigid-body transforms, driving external
//! normalization tools, and retrieving entries from a mirror or a remote archive.
//!
//! ## Layout
//!
//! - **[`core`]: File-level operations.** Column layout constants, read-only scanners
//!   (`get_all_chains`, `get_pdb_residues`, ...), line rewriters (`replace_chains`,
//!   `extract_chains`, ...) and coordinate transforms (`rottrans`, `update_xyz`).
//!
//! - **[`tools`]: External programs.** The [`tools::LineNormalizer`] seam with its
//!   subprocess implementation, plus [`tools::ToolChain`] for multi-stage pipelines.
//!
//! - **[`fetch`]: Retrieval.** Identifier validation, object-store mirrors, the wwPDB
//!   archive client and the [`fetch::Fetcher`] that ties them together.
//!
//! - **[`config`]: Settings.** TOML-backed configuration for the fetcher and tools.
//!
//! All operations are synchronous. Progress and decisions are reported through
//! `tracing`; installing a subscriber is left to the caller.

pub mod config;
pub mod core;
pub mod fetch;
pub mod tools;
