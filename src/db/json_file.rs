//! Standard backend: one pretty-printed JSON file per database.
//!
//! The file holds a top-level array of package record objects with no
//! envelope. Writes go through [`atomic`](super::atomic), so the file is only
//! ever replaced wholesale.

use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, Result};
use crate::package::{PackageRecord, Packages};
use crate::runtime::Runtime;

use super::atomic;
use super::backend::{BackendKind, InitPolicy, StorageBackend, validate_name};

/// Creates [`JsonFileBackend`] handles for one database name.
pub struct JsonFileKind<'a, R: Runtime> {
    runtime: &'a R,
    name: String,
    global_path: Option<PathBuf>,
}

impl<'a, R: Runtime> JsonFileKind<'a, R> {
    pub fn new(runtime: &'a R, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            runtime,
            name,
            global_path: None,
        })
    }

    /// Configure the file used for the global database.
    pub fn with_global_path(mut self, path: Option<PathBuf>) -> Self {
        self.global_path = path;
        self
    }
}

impl<'a, R: Runtime> BackendKind for JsonFileKind<'a, R> {
    type Backend = JsonFileBackend<'a, R>;

    fn name(&self) -> &str {
        &self.name
    }

    fn global_location(&self) -> Option<Self::Backend> {
        self.global_path.as_deref().map(|p| self.from_path(p))
    }

    fn from_path(&self, path: &Path) -> Self::Backend {
        JsonFileBackend {
            runtime: self.runtime,
            name: self.name.clone(),
            path: path.to_path_buf(),
        }
    }
}

pub struct JsonFileBackend<'a, R: Runtime> {
    runtime: &'a R,
    name: String,
    path: PathBuf,
}

impl<R: Runtime> JsonFileBackend<'_, R> {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: Runtime> StorageBackend for JsonFileBackend<'_, R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[tracing::instrument(skip(self), fields(path = ?self.path))]
    fn read(&self, policy: InitPolicy) -> Result<Packages> {
        if !self.runtime.exists(&self.path) {
            match policy {
                InitPolicy::FailIfAbsent => {
                    return Err(RegistryError::DatabaseMissing {
                        location: self.location(),
                    });
                }
                InitPolicy::InitIfAbsent => {
                    let created = atomic::create_json(self.runtime, &self.path, &Packages::new())
                        .map_err(|source| RegistryError::DatabaseWriteError {
                            location: self.location(),
                            source,
                        })?;
                    if created {
                        info!("Initialized empty package database at {:?}", self.path);
                    }
                }
            }
        }

        // The file may vanish between the existence check and the read.
        let content = self.runtime.read_to_string(&self.path).map_err(|source| {
            if is_not_found(&source) {
                RegistryError::DatabaseMissing {
                    location: self.location(),
                }
            } else {
                RegistryError::DatabaseReadError {
                    location: self.location(),
                    source,
                }
            }
        })?;

        let packages: Packages =
            serde_json::from_str(&content).map_err(|source| RegistryError::DatabaseCorrupt {
                location: self.location(),
                source,
            })?;

        debug!("Read {} package(s) from {:?}", packages.len(), self.path);
        Ok(packages)
    }

    #[tracing::instrument(skip(self, packages), fields(path = ?self.path))]
    fn write(&self, packages: &[PackageRecord]) -> Result<()> {
        atomic::write_json(self.runtime, &self.path, packages).map_err(|source| {
            RegistryError::DatabaseWriteError {
                location: self.location(),
                source,
            }
        })?;
        debug!("Wrote {} package(s) to {:?}", packages.len(), self.path);
        Ok(())
    }
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
