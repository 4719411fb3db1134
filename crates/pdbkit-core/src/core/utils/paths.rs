use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Replaces the extension of `path` with `suffix`: `dir/1abc.pdb` + `.untidy.pdb`
/// gives `dir/1abc.untidy.pdb`. A path without an extension gets the suffix appended.
pub fn replace_extension(path: &Path, suffix: &str) -> PathBuf {
    let mut stem: OsString = path.with_extension("").into_os_string();
    stem.push(suffix);
    PathBuf::from(stem)
}

/// Appends `suffix` to the full file name: `1abc.pdb` + `.tidy.pdb` gives
/// `1abc.pdb.tidy.pdb`.
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
