use super::archive::ArchiveClient;
use super::error::{FetchError, StoreError};
use super::id::{EntryVariant, PdbId};
use super::store::ObjectStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One place a structure can be fetched from.
pub trait StructureSource {
    /// Short name used in logs and in [`super::FetchedStructure::source`].
    fn name(&self) -> &str;

    /// Fetches one variant of an entry into `work_dir`; `Ok(None)` is a miss.
    fn fetch(
        &self,
        id: &PdbId,
        variant: EntryVariant,
        work_dir: &Path,
    ) -> Result<Option<PathBuf>, FetchError>;

    /// Whether a hit from this source should be copied into the mirror.
    fn write_through(&self) -> bool {
        false
    }
}

/// Reads compressed entries from an object-store mirror.
pub struct MirrorSource {
    store: Arc<dyn ObjectStore>,
}

impl MirrorSource {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

impl StructureSource for MirrorSource {
    fn name(&self) -> &str {
        "mirror"
    }

    fn fetch(
        &self,
        id: &PdbId,
        variant: EntryVariant,
        work_dir: &Path,
    ) -> Result<Option<PathBuf>, FetchError> {
        let local = work_dir.join(variant.mirror_file_name(id));
        match self.store.read_input_file(&variant.mirror_key(id), &local) {
            Ok(()) => Ok(local.is_file().then_some(local)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Downloads entries from a remote archive.
pub struct ArchiveSource {
    archive: Box<dyn ArchiveClient>,
}

impl ArchiveSource {
    pub fn new(archive: Box<dyn ArchiveClient>) -> Self {
        Self { archive }
    }
}

impl StructureSource for ArchiveSource {
    fn name(&self) -> &str {
        "archive"
    }

    fn fetch(
        &self,
        id: &PdbId,
        variant: EntryVariant,
        work_dir: &Path,
    ) -> Result<Option<PathBuf>, FetchError> {
        let fetched = self.archive.retrieve(id, variant, work_dir)?;
        Ok(fetched.filter(|path| path.is_file()))
    }

    fn write_through(&self) -> bool {
        true
    }
}
