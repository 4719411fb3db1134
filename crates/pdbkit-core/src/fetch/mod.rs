//! Structure retrieval from an object-store mirror with fallback to a remote archive.
//!
//! A [`Fetcher`] walks an ordered list of [`StructureSource`]s and, for each source,
//! the four entry variants in [`ENTRY_VARIANTS`] order. The first hit wins. Hits
//! from a source that is not the mirror itself are compressed and written back to
//! the mirror so the next lookup is served from there.

pub mod archive;
pub mod error;
pub mod fetcher;
pub mod id;
pub mod source;
pub mod store;

#[cfg(test)]
mod testing;

pub use archive::{ArchiveClient, DEFAULT_ARCHIVE_URL, WwpdbArchive, download_pdb};
pub use error::{FetchError, StoreError};
pub use fetcher::{FetchedStructure, Fetcher};
pub use id::{ENTRY_VARIANTS, EntryVariant, PdbId, StructureFormat};
pub use source::{ArchiveSource, MirrorSource, StructureSource};
pub use store::{FsObjectStore, HttpObjectStore, ObjectStore};
