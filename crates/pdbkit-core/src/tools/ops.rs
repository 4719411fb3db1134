use super::error::ToolError;
use super::normalizer::LineNormalizer;
use crate::core::utils::paths;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Normalizes record formatting of `file`.
///
/// The result goes to `output` or, by default, to `<file>.tidy.pdb`. With `replace`
/// set and no explicit `output`, the normalized file is moved over the original and
/// the original path is returned.
pub fn tidy<N: LineNormalizer + ?Sized>(
    normalizer: &N,
    file: impl AsRef<Path>,
    replace: bool,
    output: Option<&Path>,
) -> Result<PathBuf, ToolError> {
    let file = file.as_ref();
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths::append_suffix(file, ".tidy.pdb"));

    normalizer.tidy(file, &target)?;
    ensure_created(&target)?;

    if replace && output.is_none() {
        match fs::remove_file(file) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Original {:?} already gone before replace", file);
            }
            Err(e) => return Err(ToolError::io(file, e)),
        }
        fs::rename(&target, file).map_err(|e| ToolError::io(&target, e))?;
        info!("Tidied {:?} in place", file);
        return Ok(file.to_path_buf());
    }

    info!("Tidied {:?} into {:?}", file, target);
    Ok(target)
}

/// Clears occupancy information of `file` into a new file, by default
/// `<stem>.delocc.pdb`.
pub fn delocc_pdb<N: LineNormalizer + ?Sized>(
    normalizer: &N,
    file: impl AsRef<Path>,
    output: Option<&Path>,
) -> Result<PathBuf, ToolError> {
    let file = file.as_ref();
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths::replace_extension(file, ".delocc.pdb"));

    normalizer.delocc(file, &target)?;
    ensure_created(&target)?;
    info!("Removed occupancies of {:?} into {:?}", file, target);
    Ok(target)
}

fn ensure_created(path: &Path) -> Result<(), ToolError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ToolError::OutputMissing(path.to_string_lossy().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Upper-cases on tidy and drops the occupancy columns on delocc, recording calls.
    #[derive(Default)]
    struct InProcessNormalizer {
        calls: RefCell<Vec<(&'static str, PathBuf, PathBuf)>>,
        skip_output: bool,
    }

    impl LineNormalizer for InProcessNormalizer {
        fn tidy(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
            self.calls
                .borrow_mut()
                .push(("tidy", input.to_path_buf(), output.to_path_buf()));
            if self.skip_output {
                return Ok(());
            }
            let content = fs::read_to_string(input).map_err(|e| ToolError::io(input, e))?;
            fs::write(output, content.to_uppercase()).map_err(|e| ToolError::io(output, e))
        }

        fn delocc(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
            self.calls
                .borrow_mut()
                .push(("delocc", input.to_path_buf(), output.to_path_buf()));
            let content = fs::read_to_string(input).map_err(|e| ToolError::io(input, e))?;
            let stripped: String = content
                .lines()
                .map(|l| format!("{}\n", &l[..l.len().min(54)]))
                .collect();
            fs::write(output, stripped).map_err(|e| ToolError::io(output, e))
        }
    }

    #[test]
    fn tidy_writes_next_to_input_by_default() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("1abc.pdb");
        fs::write(&input, "atom\n").unwrap();
        let normalizer = InProcessNormalizer::default();

        let output = tidy(&normalizer, &input, false, None).unwrap();
        assert_eq!(output, dir.path().join("1abc.pdb.tidy.pdb"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "ATOM\n");
        assert_eq!(fs::read_to_string(&input).unwrap(), "atom\n");
    }

    #[test]
    fn tidy_with_replace_moves_result_over_original() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("1abc.pdb");
        fs::write(&input, "atom\n").unwrap();
        let normalizer = InProcessNormalizer::default();

        let output = tidy(&normalizer, &input, true, None).unwrap();
        assert_eq!(output, input);
        assert_eq!(fs::read_to_string(&input).unwrap(), "ATOM\n");
        assert!(!dir.path().join("1abc.pdb.tidy.pdb").exists());
    }

    #[test]
    fn tidy_with_explicit_output_never_replaces() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("1abc.pdb");
        let explicit = dir.path().join("clean.pdb");
        fs::write(&input, "atom\n").unwrap();
        let normalizer = InProcessNormalizer::default();

        let output = tidy(&normalizer, &input, true, Some(&explicit)).unwrap();
        assert_eq!(output, explicit);
        assert_eq!(fs::read_to_string(&input).unwrap(), "atom\n");
    }

    #[test]
    fn tidy_fails_when_normalizer_produces_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("1abc.pdb");
        fs::write(&input, "atom\n").unwrap();
        let normalizer = InProcessNormalizer {
            skip_output: true,
            ..Default::default()
        };

        let result = tidy(&normalizer, &input, true, None);
        assert!(matches!(result, Err(ToolError::OutputMissing(_))));
        assert!(input.exists());
    }

    #[test]
    fn delocc_pdb_uses_delocc_suffix() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("1abc.pdb");
        fs::write(
            &input,
            "ATOM      2  CA  MET A   1      38.961  20.101  26.938  0.50 50.00           C\n",
        )
        .unwrap();
        let normalizer = InProcessNormalizer::default();

        let output = delocc_pdb(&normalizer, &input, None).unwrap();
        assert_eq!(output, dir.path().join("1abc.delocc.pdb"));
        assert!(!fs::read_to_string(&output).unwrap().contains("0.50"));

        let calls = normalizer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "delocc");
    }

    #[test]
    fn normalizer_is_usable_as_trait_object() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("1abc.pdb");
        fs::write(&input, "atom\n").unwrap();
        let normalizer: Box<dyn LineNormalizer> = Box::new(InProcessNormalizer::default());

        let output = tidy(normalizer.as_ref(), &input, false, None).unwrap();
        assert!(output.exists());
    }
}
