//! Line-by-line rewrites of structure files.
//!
//! Each operation streams the input once and writes a new file; only the column
//! being rewritten changes; every other line and column is copied verbatim.

use super::error::RecordError;
use super::layout;
use crate::core::utils::paths;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Renames chains of `ATOM`/`HETATM` records according to `chain_map`.
///
/// Chains without an entry in the map, and all other records, pass through unchanged.
///
/// # Errors
///
/// Returns [`RecordError::Io`] if either file cannot be opened or written, and
/// [`RecordError::OutputMissing`] if the output file does not exist afterwards.
pub fn replace_chains(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    chain_map: &HashMap<char, char>,
) -> Result<PathBuf, RecordError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    rewrite_lines(input, output, |line| {
        if !layout::is_coordinate_record(line) {
            return Some(line.to_string());
        }
        match layout::chain_id(line).and_then(|c| chain_map.get(&c)) {
            Some(&new_chain) => Some(layout::with_chain_id(line, new_chain)),
            None => Some(line.to_string()),
        }
    })?;
    info!("Wrote chain-replaced structure to {:?}", output);
    Ok(output.to_path_buf())
}

/// Keeps only the coordinate records whose chain is listed in `chains`.
///
/// When `rename` is given, the n-th chain of `chains` is renamed to the n-th chain of
/// `rename`. Without an explicit `output`, the file is written next to the input as
/// `<stem>.<chains>.pdb`.
///
/// # Errors
///
/// Returns [`RecordError::RenameLengthMismatch`] when `rename` does not pair up with
/// `chains`, and [`RecordError::Io`] on file errors.
pub fn extract_chains(
    input: impl AsRef<Path>,
    chains: &str,
    rename: Option<&str>,
    output: Option<&Path>,
) -> Result<PathBuf, RecordError> {
    let input = input.as_ref();
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths::replace_extension(input, &format!(".{}.pdb", chains)));

    let renames: HashMap<char, char> = match rename {
        Some(rename) => {
            if chains.chars().count() != rename.chars().count() {
                return Err(RecordError::RenameLengthMismatch {
                    chains: chains.to_string(),
                    rename: rename.to_string(),
                });
            }
            chains.chars().zip(rename.chars()).collect()
        }
        None => HashMap::new(),
    };

    rewrite_lines(input, &output, |line| {
        if !layout::is_coordinate_record(line) {
            return None;
        }
        let chain = layout::chain_id(line)?;
        if !chains.contains(chain) {
            return None;
        }
        Some(match renames.get(&chain) {
            Some(&new_chain) => layout::with_chain_id(line, new_chain),
            None => line.to_string(),
        })
    })?;
    info!("Extracted chains '{}' into {:?}", chains, output);
    Ok(output)
}

/// Copies every line except `TER` records. Defaults to `<stem>.untidy.pdb`.
pub fn remove_ter_lines(
    input: impl AsRef<Path>,
    output: Option<&Path>,
) -> Result<PathBuf, RecordError> {
    let input = input.as_ref();
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths::replace_extension(input, ".untidy.pdb"));

    rewrite_lines(input, &output, |line| {
        (!layout::is_ter_line(line)).then(|| line.to_string())
    })?;
    Ok(output)
}

/// Streams `input` into `output`, writing whatever `map` returns for each line and
/// dropping lines for which it returns `None`.
fn rewrite_lines(
    input: &Path,
    output: &Path,
    mut map: impl FnMut(&str) -> Option<String>,
) -> Result<(), RecordError> {
    let reader = BufReader::new(File::open(input).map_err(|e| RecordError::io(input, e))?);
    let mut writer =
        BufWriter::new(File::create(output).map_err(|e| RecordError::io(output, e))?);

    let mut written = 0usize;
    for line in reader.lines() {
        let line = line.map_err(|e| RecordError::io(input, e))?;
        if let Some(new_line) = map(&line) {
            writeln!(writer, "{}", new_line).map_err(|e| RecordError::io(output, e))?;
            written += 1;
        }
    }
    writer.flush().map_err(|e| RecordError::io(output, e))?;
    drop(writer);

    debug!("Wrote {} lines from {:?} to {:?}", written, input, output);
    ensure_created(output)
}

pub(crate) fn ensure_created(path: &Path) -> Result<(), RecordError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(RecordError::OutputMissing(
            path.to_string_lossy().to_string(),
        ))
    }
}
