use super::archive::ArchiveClient;
use super::error::FetchError;
use super::id::{ENTRY_VARIANTS, EntryVariant, PdbId, StructureFormat};
use super::source::{ArchiveSource, MirrorSource, StructureSource};
use super::store::ObjectStore;
use crate::core::utils::paths;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A structure file placed in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedStructure {
    pub path: PathBuf,
    pub format: StructureFormat,
    pub obsolete: bool,
    /// Name of the source that served the file.
    pub source: String,
}

pub struct Fetcher {
    sources: Vec<Box<dyn StructureSource>>,
    mirror: Option<Arc<dyn ObjectStore>>,
}

impl Fetcher {
    /// Mirror first (when configured), then the archive; archive hits are written
    /// back to the mirror.
    pub fn new(mirror: Option<Arc<dyn ObjectStore>>, archive: Box<dyn ArchiveClient>) -> Self {
        let mut sources: Vec<Box<dyn StructureSource>> = Vec::with_capacity(2);
        if let Some(store) = &mirror {
            sources.push(Box::new(MirrorSource::new(store.clone())));
        }
        sources.push(Box::new(ArchiveSource::new(archive)));
        Self { sources, mirror }
    }

    /// Builds a fetcher over an arbitrary source order. Hits from sources whose
    /// [`StructureSource::write_through`] is set are uploaded to `mirror`.
    pub fn with_sources(
        sources: Vec<Box<dyn StructureSource>>,
        mirror: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        Self { sources, mirror }
    }

    /// Resolves `id` into a local file under `work_dir` (default: the current
    /// directory).
    ///
    /// Each source is tried with every variant in [`ENTRY_VARIANTS`] order before the
    /// next source is consulted. Source errors other than a miss are logged and
    /// treated as a miss.
    ///
    /// # Arguments
    ///
    /// * `id` - The four-character PDB identifier, in any case.
    /// * `work_dir` - Directory the fetched file is placed in.
    ///
    /// # Return
    ///
    /// Returns the local path, the format actually served and the name of the source
    /// that produced it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidStructure`] for a malformed identifier,
    /// [`FetchError::NotFound`] when every source misses, and the upload error if a
    /// write-through to the mirror fails.
    pub fn fetch(&self, id: &str, work_dir: Option<&Path>) -> Result<FetchedStructure, FetchError> {
        let pdb_id = PdbId::parse(id)?;
        let work_dir = match work_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().map_err(|e| FetchError::io(Path::new("."), e))?,
        };
        fs::create_dir_all(&work_dir).map_err(|e| FetchError::io(&work_dir, e))?;

        for source in &self.sources {
            for variant in ENTRY_VARIANTS {
                match source.fetch(&pdb_id, variant, &work_dir) {
                    Ok(Some(path)) => {
                        info!("Fetched {} {} from {} into {:?}", pdb_id, variant, source.name(), path);
                        if source.write_through() {
                            self.write_through(&pdb_id, variant, &path)?;
                        }
                        return Ok(FetchedStructure {
                            path,
                            format: variant.format,
                            obsolete: variant.obsolete,
                            source: source.name().to_string(),
                        });
                    }
                    Ok(None) => {
                        debug!("{} has no {} for {}", source.name(), variant, pdb_id);
                    }
                    Err(e) => {
                        warn!(
                            "{} lookup of {} {} failed, trying next: {}",
                            source.name(),
                            pdb_id,
                            variant,
                            e
                        );
                    }
                }
            }
        }

        Err(FetchError::NotFound(pdb_id.to_string()))
    }

    /// Compresses `path` to `<path>.gz`, uploads it under the variant's mirror key and
    /// removes the local archive copy.
    fn write_through(&self, id: &PdbId, variant: EntryVariant, path: &Path) -> Result<(), FetchError> {
        let Some(store) = &self.mirror else {
            return Ok(());
        };
        let gz_path = paths::append_suffix(path, ".gz");
        compress(path, &gz_path)?;

        let key = variant.mirror_key(id);
        let upload = store.write_output_file(&gz_path, &key);

        match fs::remove_file(&gz_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove {:?}: {}", gz_path, e),
        }

        upload?;
        info!("Populated mirror key {}", key);
        Ok(())
    }
}

fn compress(source: &Path, target: &Path) -> Result<(), FetchError> {
    let mut reader =
        BufReader::new(File::open(source).map_err(|e| FetchError::io(source, e))?);
    let file = File::create(target).map_err(|e| FetchError::io(target, e))?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    io::copy(&mut reader, &mut encoder).map_err(|e| FetchError::io(target, e))?;
    encoder.finish().map_err(|e| FetchError::io(target, e))?;
    Ok(())
}
