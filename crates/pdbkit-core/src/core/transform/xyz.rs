use crate::core::records::RecordError;
use crate::core::records::layout;
use crate::core::records::rewriter::ensure_created;
use crate::core::records::scanner::get_atom_lines;
use crate::core::utils::paths;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The 24-column coordinate block of every `ATOM` line of a file.
pub fn coordinate_fields(path: impl AsRef<Path>) -> impl Iterator<Item = String> {
    get_atom_lines(path).map(|line| layout::field(&line, layout::COORDINATES).to_string())
}

/// Writes the `ATOM` lines of `old` with their coordinate block replaced by the
/// successive items of `new_fields`.
///
/// Lines are paired in order and writing stops at whichever sequence ends first; a
/// length mismatch is not an error. Only `ATOM` lines are written.
///
/// # Arguments
///
/// * `old` - The file whose atom lines supply every non-coordinate column.
/// * `new_fields` - 24-column coordinate blocks, one per atom line.
/// * `output` - Destination path. Defaults to `<stem>.rottrans.pdb` beside `old`.
///
/// # Return
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns [`RecordError::Io`] if the output cannot be created or written, and
/// [`RecordError::OutputMissing`] if it does not exist afterwards.
pub fn update_xyz<I>(
    old: impl AsRef<Path>,
    new_fields: I,
    output: Option<&Path>,
) -> Result<PathBuf, RecordError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let old = old.as_ref();
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths::replace_extension(old, ".rottrans.pdb"));

    let file = File::create(&output).map_err(|e| RecordError::io(&output, e))?;
    let mut writer = BufWriter::new(file);

    let mut written = 0usize;
    for (old_line, new_field) in get_atom_lines(old).zip(new_fields) {
        let line = layout::with_coordinates(&old_line, new_field.as_ref());
        writeln!(writer, "{}", line).map_err(|e| RecordError::io(&output, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| RecordError::io(&output, e))?;
    drop(writer);

    debug!("Updated coordinates of {} atom lines into {:?}", written, output);
    ensure_created(&output)?;
    Ok(output)
}

/// Copies the coordinates of `new` onto the atom lines of `old`.
pub fn update_xyz_from_file(
    old: impl AsRef<Path>,
    new: impl AsRef<Path>,
    output: Option<&Path>,
) -> Result<PathBuf, RecordError> {
    update_xyz(old, coordinate_fields(new), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const OLD: &str = "\
HEADER    OLD
ATOM      1  N   MET A   1      38.198  19.582  28.113  1.00 50.00           N
ATOM      2  CA  MET A   1      38.961  20.101  26.938  1.00 50.00           C
ATOM      3  C   MET A   1      38.000  21.000  26.000  1.00 50.00           C
END
";

    const NEW: &str = "\
ATOM      1  N   MET A   1       1.000   2.000   3.000  1.00 10.00           N
ATOM      2  CA  MET A   1       4.000   5.000   6.000  1.00 10.00           C
";

    #[test]
    fn update_xyz_from_file_splices_coordinates_and_truncates() {
        let dir = tempdir().unwrap();
        let old = dir.path().join("old.pdb");
        let new = dir.path().join("new.pdb");
        fs::write(&old, OLD).unwrap();
        fs::write(&new, NEW).unwrap();

        let output = update_xyz_from_file(&old, &new, None).unwrap();
        assert_eq!(output, dir.path().join("old.rottrans.pdb"));

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "ATOM      1  N   MET A   1       1.000   2.000   3.000  1.00 50.00           N"
        );
        assert_eq!(
            lines[1],
            "ATOM      2  CA  MET A   1       4.000   5.000   6.000  1.00 50.00           C"
        );
    }

    #[test]
    fn update_xyz_accepts_caller_supplied_fields() {
        let dir = tempdir().unwrap();
        let old = dir.path().join("old.pdb");
        let out = dir.path().join("custom.pdb");
        fs::write(&old, OLD).unwrap();

        let fields = vec!["   0.000   0.000   0.000"; 5];
        update_xyz(&old, fields, Some(&out)).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(
            content
                .lines()
                .all(|l| &l[30..54] == "   0.000   0.000   0.000")
        );
    }

    #[test]
    fn coordinate_fields_reads_the_coordinate_block() {
        let dir = tempdir().unwrap();
        let new = dir.path().join("new.pdb");
        fs::write(&new, NEW).unwrap();

        let fields: Vec<String> = coordinate_fields(&new).collect();
        assert_eq!(
            fields,
            vec!["   1.000   2.000   3.000", "   4.000   5.000   6.000"]
        );
    }
}
