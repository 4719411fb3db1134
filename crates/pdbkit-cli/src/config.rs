use crate::cli::FetchOverrides;
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use pdbkit::config::{FetchConfig, MirrorConfig, PdbkitConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

pub fn default_config_path() -> Result<PathBuf> {
    ProjectDirs::from("edu", "caltech", "pdbkit")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            CliError::Config("Could not determine a configuration directory".to_string())
        })
}

/// Loads `explicit` if given. Otherwise loads the default config file when it exists
/// and falls back to built-in defaults when it does not.
pub fn load(explicit: Option<&Path>) -> Result<PdbkitConfig> {
    if let Some(path) = explicit {
        return Ok(PdbkitConfig::load(path)?);
    }

    match default_config_path() {
        Ok(path) if path.is_file() => Ok(PdbkitConfig::load(&path)?),
        Ok(path) => {
            debug!("No config file at {:?}, using defaults.", path);
            Ok(PdbkitConfig::default())
        }
        Err(e) => {
            debug!("{}; using defaults.", e);
            Ok(PdbkitConfig::default())
        }
    }
}

pub fn apply_fetch_overrides(config: &mut FetchConfig, overrides: &FetchOverrides) {
    if let Some(dir) = &overrides.work_dir {
        config.work_dir = Some(dir.clone());
    }
    if let Some(url) = &overrides.archive_url {
        config.archive_url = url.clone();
    }
    if overrides.no_mirror {
        config.mirror = None;
    } else if let Some(path) = &overrides.mirror_dir {
        config.mirror = Some(MirrorConfig::Directory { path: path.clone() });
    } else if let Some(url) = &overrides.mirror_url {
        config.mirror = Some(MirrorConfig::Http {
            base_url: url.clone(),
        });
    }
    debug!("Effective fetch configuration: {:?}", config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pdbkit.toml");
        fs::write(&path, "[fetch]\ntimeout-secs = 5\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.fetch.timeout_secs, Some(5));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let result = load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::ConfigFile(_))));
    }

    #[test]
    fn default_path_ends_with_config_file_name() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = FetchConfig {
            mirror: Some(MirrorConfig::Http {
                base_url: "http://configured".to_string(),
            }),
            ..Default::default()
        };
        let overrides = FetchOverrides {
            work_dir: Some(PathBuf::from("/scratch")),
            mirror_dir: Some(PathBuf::from("/mirror")),
            archive_url: Some("http://archive".to_string()),
            ..Default::default()
        };

        apply_fetch_overrides(&mut config, &overrides);
        assert_eq!(config.work_dir, Some(PathBuf::from("/scratch")));
        assert_eq!(config.archive_url, "http://archive");
        assert_eq!(
            config.mirror,
            Some(MirrorConfig::Directory {
                path: PathBuf::from("/mirror")
            })
        );
    }

    #[test]
    fn no_mirror_clears_configured_mirror() {
        let mut config = FetchConfig {
            mirror: Some(MirrorConfig::Directory {
                path: PathBuf::from("/mirror"),
            }),
            ..Default::default()
        };
        let overrides = FetchOverrides {
            no_mirror: true,
            ..Default::default()
        };

        apply_fetch_overrides(&mut config, &overrides);
        assert!(config.mirror.is_none());
    }

    #[test]
    fn empty_overrides_keep_file_values() {
        let mut config = FetchConfig {
            timeout_secs: Some(30),
            ..Default::default()
        };
        let before = config.clone();
        apply_fetch_overrides(&mut config, &FetchOverrides::default());
        assert_eq!(config, before);
    }
}
