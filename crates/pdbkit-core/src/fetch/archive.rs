use super::error::FetchError;
use super::fetcher::FetchedStructure;
use super::id::{EntryVariant, PdbId, StructureFormat};
use flate2::read::GzDecoder;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_ARCHIVE_URL: &str = "https://files.wwpdb.org/pub/pdb/data/structures";

/// A remote archive that can download one entry variant into a local directory.
pub trait ArchiveClient {
    /// Downloads the entry into `dir`, returning the local path.
    ///
    /// Returns `Ok(None)` when the archive does not have this variant of the entry.
    fn retrieve(
        &self,
        id: &PdbId,
        variant: EntryVariant,
        dir: &Path,
    ) -> Result<Option<PathBuf>, FetchError>;
}

/// Client for the wwPDB file server layout:
///
/// ```text
/// <base>/divided/pdb/ab/pdb1abc.ent.gz
/// <base>/divided/mmCIF/ab/1abc.cif.gz
/// <base>/obsolete/pdb/ab/pdb1abc.ent.gz
/// <base>/obsolete/mmCIF/ab/1abc.cif.gz
/// ```
///
/// Downloads are decompressed on arrival into `pdb<id>.ent` or `<id>.cif`.
#[derive(Debug, Clone)]
pub struct WwpdbArchive {
    base_url: String,
    client: Client,
}

impl WwpdbArchive {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.into(),
            client: builder.build()?,
        })
    }

    pub fn entry_url(&self, id: &PdbId, variant: EntryVariant) -> String {
        let section = if variant.obsolete { "obsolete" } else { "divided" };
        let (format_dir, remote_name) = match variant.format {
            StructureFormat::Pdb => ("pdb", format!("pdb{}.ent.gz", id)),
            StructureFormat::MmCif => ("mmCIF", format!("{}.cif.gz", id)),
        };
        format!(
            "{}/{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            section,
            format_dir,
            id.middle(),
            remote_name
        )
    }

    pub fn local_file_name(id: &PdbId, format: StructureFormat) -> String {
        match format {
            StructureFormat::Pdb => format!("pdb{}.ent", id),
            StructureFormat::MmCif => format!("{}.cif", id),
        }
    }
}

impl ArchiveClient for WwpdbArchive {
    fn retrieve(
        &self,
        id: &PdbId,
        variant: EntryVariant,
        dir: &Path,
    ) -> Result<Option<PathBuf>, FetchError> {
        let url = self.entry_url(id, variant);
        debug!("Requesting {}", url);

        let response = self.client.get(&url).send()?;
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                return Err(FetchError::Status { url, status });
            }
            _ => {}
        }

        fs::create_dir_all(dir).map_err(|e| FetchError::io(dir, e))?;
        let target = dir.join(Self::local_file_name(id, variant.format));
        write_decompressed(response, &target)?;
        info!("Downloaded {} {} to {:?}", id, variant, target);
        Ok(Some(target))
    }
}

/// Streams gzip data from `reader` into `target`, removing the partial file on error.
pub(crate) fn write_decompressed(reader: impl Read, target: &Path) -> Result<(), FetchError> {
    let mut decoder = GzDecoder::new(reader);
    let mut file = File::create(target).map_err(|e| FetchError::io(target, e))?;
    if let Err(e) = io::copy(&mut decoder, &mut file) {
        drop(file);
        let _ = fs::remove_file(target);
        return Err(FetchError::io(target, e));
    }
    Ok(())
}

/// Downloads the current mmCIF entry for `id` straight from the archive.
///
/// # Errors
///
/// Returns [`FetchError::InvalidStructure`] if the identifier is malformed, the
/// archive has no such entry, or the download did not leave a file on disk.
pub fn download_pdb<A: ArchiveClient + ?Sized>(
    archive: &A,
    id: &str,
    dir: &Path,
) -> Result<FetchedStructure, FetchError> {
    let pdb_id = PdbId::parse(id)?;
    let variant = EntryVariant::new(StructureFormat::MmCif, false);
    let invalid = |reason: String| FetchError::InvalidStructure {
        id: id.to_string(),
        reason,
    };

    match archive.retrieve(&pdb_id, variant, dir) {
        Ok(Some(path)) if path.is_file() => Ok(FetchedStructure {
            path,
            format: StructureFormat::MmCif,
            obsolete: false,
            source: "archive".to_string(),
        }),
        Ok(Some(path)) => Err(invalid(format!("archive produced no file at {:?}", path))),
        Ok(None) => Err(invalid("not present in archive".to_string())),
        Err(e) => {
            warn!("Direct download of {} failed: {}", pdb_id, e);
            Err(invalid(e.to_string()))
        }
    }
}
