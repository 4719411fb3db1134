//! Column layout of PDB coordinate records.
//!
//! All offsets are 0-based byte offsets into a line with its terminator removed,
//! expressed as half-open ranges. A field that falls outside a short line is read
//! as the empty string rather than being an error.
//!
//! ```text
//! ATOM      1  N   MET A   1      38.198  19.582  28.113  1.00 50.00           N
//! |----|         ||     |||   |      |       |       |
//! 0    6       13  15  21|22  27     30      38      46  54
//! ```

use phf::{Set, phf_set};
use std::ops::Range;

/// Record name of atom lines considered by the scanner.
pub const ATOM: &str = "ATOM";
/// Record name of hetero-atom lines.
pub const HETATM: &str = "HETATM";
/// Record name of chain terminator lines.
pub const TER: &str = "TER";

/// Record name field, left-justified and space padded.
pub const RECORD_NAME: Range<usize> = 0..6;
/// Two-character slice of the atom-name field used for alpha-carbon detection.
pub const CA_PROBE: Range<usize> = 13..15;
/// Chain identifier column.
pub const CHAIN_ID: usize = 21;
/// Residue sequence number plus insertion code.
pub const RESIDUE_KEY: Range<usize> = 22..27;
pub const X: Range<usize> = 30..38;
pub const Y: Range<usize> = 38..46;
pub const Z: Range<usize> = 46..54;
/// The full x/y/z block, three 8-character fields.
pub const COORDINATES: Range<usize> = 30..54;
/// Width of a single coordinate field.
pub const COORDINATE_WIDTH: usize = 8;

static COORDINATE_RECORDS: Set<&'static str> = phf_set! { "ATOM", "HETATM" };

/// Returns true if the line is an `ATOM` record.
pub fn is_atom_line(line: &str) -> bool {
    line.starts_with(ATOM)
}

/// Returns true if the line is an `ATOM` or `HETATM` coordinate record.
pub fn is_coordinate_record(line: &str) -> bool {
    COORDINATE_RECORDS.contains(field(line, RECORD_NAME).trim_end())
}

/// Returns true if the line is a chain terminator.
pub fn is_ter_line(line: &str) -> bool {
    line.starts_with(TER)
}

/// Returns the columns in `range`, or `""` when the line is too short.
pub fn field(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    line.get(range.start..end).unwrap_or("")
}

/// Returns the chain identifier of a record, if the line reaches that column.
pub fn chain_id(line: &str) -> Option<char> {
    line.get(CHAIN_ID..CHAIN_ID + 1)
        .and_then(|s| s.chars().next())
}

/// Returns a copy of `line` with the chain identifier column replaced.
///
/// Lines too short to carry a chain column are returned unchanged.
pub fn with_chain_id(line: &str, chain: char) -> String {
    match (line.get(..CHAIN_ID), line.get(CHAIN_ID + 1..)) {
        (Some(head), Some(tail)) if line.len() > CHAIN_ID => {
            let mut out = String::with_capacity(line.len());
            out.push_str(head);
            out.push(chain);
            out.push_str(tail);
            out
        }
        _ => line.to_string(),
    }
}

/// Splices `coordinates` into the line in place of the [`COORDINATES`] block.
///
/// Everything before column 30 and from column 54 on is copied verbatim; a line
/// shorter than 30 columns keeps all of its content as the prefix.
pub fn with_coordinates(line: &str, coordinates: &str) -> String {
    let head = field(line, 0..COORDINATES.start);
    let tail = line.get(COORDINATES.end..).unwrap_or("");
    let mut out = String::with_capacity(head.len() + coordinates.len() + tail.len());
    out.push_str(head);
    out.push_str(coordinates);
    out.push_str(tail);
    out
}
