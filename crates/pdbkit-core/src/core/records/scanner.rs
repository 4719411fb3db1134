//! Read-only queries over the `ATOM` records of a structure file.
//!
//! Every function here opens the file itself and treats an unreadable file as one
//! without data: the sequences come back empty, [`is_ca_model`] answers `false` and
//! [`get_first_chain`] answers `None`. Callers that need to tell "missing" from
//! "empty" should check the path first.

use super::error::RecordError;
use super::layout;
use crate::core::utils::natural::NaturalKey;
use nalgebra::Point3;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::debug;

/// Lazy iterator over the `ATOM` lines of a file, without line terminators.
///
/// Created by [`get_atom_lines`]. Each call re-opens the file, so a fresh iterator
/// always starts from the top.
pub struct AtomLines {
    lines: Option<Lines<BufReader<File>>>,
    line_number: usize,
}

impl AtomLines {
    /// 1-based line number of the most recently yielded line, counting every line
    /// in the file rather than only atom lines.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl Iterator for AtomLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let next = self.lines.as_mut()?.next()?;
            self.line_number += 1;
            match next {
                Ok(line) if layout::is_atom_line(&line) => return Some(line),
                Ok(_) => continue,
                Err(e) => {
                    debug!(
                        "Stopping atom scan at line {}: {}",
                        self.line_number, e
                    );
                    self.lines = None;
                    return None;
                }
            }
        }
    }
}

/// Streams the `ATOM` lines of a PDB file without their line terminators.
///
/// # Arguments
///
/// * `path` - The PDB file to scan.
///
/// # Return
///
/// Returns a lazy iterator over the atom lines in file order. A file that cannot be
/// opened yields an empty iterator, and a read error part way through ends it early.
pub fn get_atom_lines(path: impl AsRef<Path>) -> AtomLines {
    let path = path.as_ref();
    let lines = match File::open(path) {
        Ok(file) => Some(BufReader::new(file).lines()),
        Err(e) => {
            debug!("Cannot open {:?} for scanning: {}", path, e);
            None
        }
    };
    AtomLines {
        lines,
        line_number: 0,
    }
}

/// Chain identifier of the first `ATOM` line.
///
/// # Return
///
/// Returns `None` when the file is unreadable, has no atom lines, or its first atom
/// line is too short to carry a chain column.
pub fn get_first_chain(path: impl AsRef<Path>) -> Option<char> {
    get_atom_lines(path)
        .next()
        .and_then(|line| layout::chain_id(&line))
}

/// Distinct chain identifiers across all `ATOM` lines, in sorted order.
pub fn get_all_chains(path: impl AsRef<Path>) -> BTreeSet<char> {
    get_atom_lines(path)
        .filter_map(|line| layout::chain_id(&line))
        .collect()
}

/// Returns true if every `ATOM` line names an alpha carbon.
///
/// A readable file with no atom lines counts as a CA model.
pub fn is_ca_model(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let Ok(file) = File::open(path) else {
        return false;
    };
    for line in BufReader::new(file).lines() {
        let Ok(line) = line else {
            return false;
        };
        if layout::is_atom_line(&line) && layout::field(&line, layout::CA_PROBE) != "CA" {
            return false;
        }
    }
    true
}

/// Lazy iterator over residue keys, one per contiguous run of atoms sharing a key.
pub struct Residues {
    atoms: AtomLines,
    previous: Option<NaturalKey>,
}

impl Iterator for Residues {
    type Item = NaturalKey;

    fn next(&mut self) -> Option<NaturalKey> {
        for line in self.atoms.by_ref() {
            let key = NaturalKey::parse(layout::field(&line, layout::RESIDUE_KEY));
            if self.previous.as_ref() != Some(&key) {
                self.previous = Some(key.clone());
                return Some(key);
            }
        }
        None
    }
}

/// Residue identifiers of the `ATOM` lines, collapsing consecutive repeats.
pub fn get_pdb_residues(path: impl AsRef<Path>) -> Residues {
    Residues {
        atoms: get_atom_lines(path),
        previous: None,
    }
}

/// Reads the x/y/z coordinates of every `ATOM` line, in file order.
///
/// # Errors
///
/// Returns [`RecordError::InvalidCoordinate`] if a coordinate column does not hold a
/// number. An unreadable file is not an error and yields an empty vector.
pub fn read_pdb(path: impl AsRef<Path>) -> Result<Vec<Point3<f64>>, RecordError> {
    let mut atoms = get_atom_lines(path);
    let mut coords = Vec::new();
    while let Some(line) = atoms.next() {
        let line_number = atoms.line_number();
        let x = parse_coordinate(&line, line_number, layout::X, "31-38")?;
        let y = parse_coordinate(&line, line_number, layout::Y, "39-46")?;
        let z = parse_coordinate(&line, line_number, layout::Z, "47-54")?;
        coords.push(Point3::new(x, y, z));
    }
    Ok(coords)
}

fn parse_coordinate(
    line: &str,
    line_number: usize,
    range: std::ops::Range<usize>,
    columns: &'static str,
) -> Result<f64, RecordError> {
    let raw = layout::field(line, range);
    raw.trim()
        .parse()
        .map_err(|_| RecordError::InvalidCoordinate {
            line: line_number,
            columns,
            value: raw.to_string(),
        })
}
