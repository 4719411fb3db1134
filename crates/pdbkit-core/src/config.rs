use crate::fetch::{
    DEFAULT_ARCHIVE_URL, FetchError, Fetcher, FsObjectStore, HttpObjectStore, ObjectStore,
    WwpdbArchive,
};
use crate::tools::{CommandSpec, SubprocessNormalizer, ToolChain};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Top-level settings, usually read from a `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdbkitConfig {
    pub fetch: FetchConfig,
    pub tools: ToolsConfig,
}

impl PdbkitConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FetchConfig {
    pub work_dir: Option<PathBuf>,
    pub archive_url: String,
    pub timeout_secs: Option<u64>,
    pub mirror: Option<MirrorConfig>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            timeout_secs: None,
            mirror: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn archive(&self) -> Result<WwpdbArchive, FetchError> {
        WwpdbArchive::new(self.archive_url.clone(), self.timeout())
    }

    pub fn mirror_store(&self) -> Result<Option<Arc<dyn ObjectStore>>, FetchError> {
        let store: Arc<dyn ObjectStore> = match &self.mirror {
            None => return Ok(None),
            Some(MirrorConfig::Directory { path }) => Arc::new(FsObjectStore::new(path)),
            Some(MirrorConfig::Http { base_url }) => {
                Arc::new(HttpObjectStore::new(base_url.clone(), self.timeout())?)
            }
        };
        Ok(Some(store))
    }

    pub fn build_fetcher(&self) -> Result<Fetcher, FetchError> {
        Ok(Fetcher::new(self.mirror_store()?, Box::new(self.archive()?)))
    }
}

/// Where the object-store mirror lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum MirrorConfig {
    Directory {
        path: PathBuf,
    },
    Http {
        #[serde(rename = "base-url")]
        base_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub tidy: CommandSpec,
    pub delocc: CommandSpec,
    /// Stages of the `pipeline` tool chain, in execution order.
    pub pipeline: Vec<CommandSpec>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        let SubprocessNormalizer { tidy, delocc } = SubprocessNormalizer::default();
        Self {
            tidy,
            delocc,
            pipeline: Vec::new(),
        }
    }
}

impl ToolsConfig {
    pub fn normalizer(&self) -> SubprocessNormalizer {
        SubprocessNormalizer {
            tidy: self.tidy.clone(),
            delocc: self.delocc.clone(),
        }
    }

    pub fn pipeline(&self) -> ToolChain {
        ToolChain::new(self.pipeline.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PdbkitConfig::from_toml_str("").unwrap();
        assert_eq!(config, PdbkitConfig::default());
        assert_eq!(config.fetch.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(config.tools.tidy.program, "pdb_tidy");
        assert_eq!(config.tools.delocc.program, "pdb_delocc");
        assert!(config.tools.pipeline().commands().is_empty());
    }

    #[test]
    fn full_document_is_parsed() {
        let config = PdbkitConfig::from_toml_str(
            r#"
            [fetch]
            work-dir = "/scratch"
            archive-url = "https://example.org/structures"
            timeout-secs = 60

            [fetch.mirror]
            type = "directory"
            path = "/data/pdb-mirror"

            [tools]
            tidy = { program = "python", args = ["-m", "pdbtools.pdb_tidy"] }
            delocc = { program = "pdb_delocc" }
            pipeline = [
                { program = "pdb_delhetatm" },
                { program = "pdb_tidy", args = ["-strict"] },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.fetch.work_dir, Some(PathBuf::from("/scratch")));
        assert_eq!(config.fetch.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(
            config.fetch.mirror,
            Some(MirrorConfig::Directory {
                path: PathBuf::from("/data/pdb-mirror")
            })
        );
        assert_eq!(
            config.tools.tidy,
            CommandSpec::new("python").with_args(["-m", "pdbtools.pdb_tidy"])
        );
        assert!(config.tools.delocc.args.is_empty());
        assert_eq!(
            config.tools.pipeline().commands(),
            &[
                CommandSpec::new("pdb_delhetatm"),
                CommandSpec::new("pdb_tidy").with_args(["-strict"]),
            ]
        );
    }

    #[test]
    fn http_mirror_uses_base_url_key() {
        let config = PdbkitConfig::from_toml_str(
            r#"
            [fetch.mirror]
            type = "http"
            base-url = "https://mirror.example.org/pdb"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.fetch.mirror,
            Some(MirrorConfig::Http {
                base_url: "https://mirror.example.org/pdb".to_string()
            })
        );
        assert!(config.fetch.mirror_store().unwrap().is_some());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(PdbkitConfig::from_toml_str("[fetch]\nretries = 3\n").is_err());
        assert!(PdbkitConfig::from_toml_str("[network]\n").is_err());
    }

    #[test]
    fn load_reports_path_on_failure() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            PdbkitConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[fetch\n").unwrap();
        match PdbkitConfig::load(&broken) {
            Err(ConfigError::Toml { path, .. }) => assert!(path.ends_with("broken.toml")),
            other => panic!("expected a TOML error, got {:?}", other),
        }
    }

    #[test]
    fn directory_mirror_builds_fetcher() {
        let dir = tempdir().unwrap();
        let config = FetchConfig {
            mirror: Some(MirrorConfig::Directory {
                path: dir.path().to_path_buf(),
            }),
            ..Default::default()
        };
        assert!(config.mirror_store().unwrap().is_some());
        assert!(config.build_fetcher().is_ok());
        assert!(FetchConfig::default().mirror_store().unwrap().is_none());
    }
}
