use super::error::StoreError;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// A key-value blob store holding compressed structure files.
pub trait ObjectStore {
    /// Copies the object at `key` into `local_path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the key does not exist.
    fn read_input_file(&self, key: &str, local_path: &Path) -> Result<(), StoreError>;

    /// Uploads `local_path` under `key`, replacing any existing object.
    fn write_output_file(&self, local_path: &Path, key: &str) -> Result<(), StoreError>;
}

/// A directory tree used as a mirror: keys are relative paths under `root`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStore for FsObjectStore {
    fn read_input_file(&self, key: &str, local_path: &Path) -> Result<(), StoreError> {
        let source = self.object_path(key);
        if !source.is_file() {
            return Err(StoreError::NotFound {
                key: key.to_string(),
            });
        }
        fs::copy(&source, local_path).map_err(|e| StoreError::io(local_path, e))?;
        debug!("Copied mirror object {} to {:?}", key, local_path);
        Ok(())
    }

    fn write_output_file(&self, local_path: &Path, key: &str) -> Result<(), StoreError> {
        let target = self.object_path(key);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::copy(local_path, &target).map_err(|e| StoreError::io(&target, e))?;
        debug!("Stored {:?} as mirror object {}", local_path, key);
        Ok(())
    }
}

/// An object store reachable over plain HTTP: `GET` reads and `PUT` writes
/// `<base-url>/<key>`.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    base_url: String,
    client: Client,
}

impl HttpObjectStore {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.into(),
            client: builder.build()?,
        })
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

impl ObjectStore for HttpObjectStore {
    fn read_input_file(&self, key: &str, local_path: &Path) -> Result<(), StoreError> {
        let url = self.object_url(key);
        let http_err = |source| StoreError::Http {
            key: key.to_string(),
            source,
        };

        let mut response = self.client.get(&url).send().map_err(http_err)?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(StoreError::NotFound {
                    key: key.to_string(),
                });
            }
            status if !status.is_success() => {
                return Err(StoreError::Status {
                    key: key.to_string(),
                    status,
                });
            }
            _ => {}
        }

        let mut file = File::create(local_path).map_err(|e| StoreError::io(local_path, e))?;
        if let Err(e) = response.copy_to(&mut file) {
            drop(file);
            let _ = fs::remove_file(local_path);
            return Err(http_err(e));
        }
        debug!("Downloaded {} to {:?}", url, local_path);
        Ok(())
    }

    fn write_output_file(&self, local_path: &Path, key: &str) -> Result<(), StoreError> {
        let url = self.object_url(key);
        let body = fs::read(local_path).map_err(|e| StoreError::io(local_path, e))?;

        let response = self
            .client
            .put(&url)
            .body(body)
            .send()
            .map_err(|source| StoreError::Http {
                key: key.to_string(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                key: key.to_string(),
                status: response.status(),
            });
        }
        debug!("Uploaded {:?} to {}", local_path, url);
        Ok(())
    }
}
