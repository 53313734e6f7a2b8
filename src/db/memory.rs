//! Process-local backend keeping every database in a shared map.
//!
//! Handles created by the same [`MemoryKind`] (or its clones) share one map,
//! so a store written by one operation is visible to the next even though
//! each operation resolves a fresh handle.

use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{RegistryError, Result};
use crate::package::{PackageRecord, Packages};

use super::backend::{BackendKind, InitPolicy, StorageBackend, validate_name};

const GLOBAL_KEY: &str = "<global>";

type Stores = Arc<Mutex<HashMap<PathBuf, Packages>>>;

#[derive(Clone)]
pub struct MemoryKind {
    name: String,
    has_global: bool,
    stores: Stores,
}

impl MemoryKind {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            has_global: false,
            stores: Stores::default(),
        })
    }

    /// Enable the global database of this kind.
    pub fn with_global(mut self) -> Self {
        self.has_global = true;
        self
    }

    /// Whether a store exists at `path`.
    pub fn contains(&self, path: &Path) -> bool {
        lock(&self.stores).contains_key(path)
    }

    fn handle(&self, key: PathBuf) -> MemoryBackend {
        MemoryBackend {
            name: self.name.clone(),
            key,
            stores: Arc::clone(&self.stores),
        }
    }
}

impl BackendKind for MemoryKind {
    type Backend = MemoryBackend;

    fn name(&self) -> &str {
        &self.name
    }

    fn global_location(&self) -> Option<Self::Backend> {
        self.has_global.then(|| self.handle(PathBuf::from(GLOBAL_KEY)))
    }

    fn from_path(&self, path: &Path) -> Self::Backend {
        self.handle(path.to_path_buf())
    }
}

pub struct MemoryBackend {
    name: String,
    key: PathBuf,
    stores: Stores,
}

impl StorageBackend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> String {
        format!("memory:{}", self.key.display())
    }

    fn read(&self, policy: InitPolicy) -> Result<Packages> {
        let mut stores = lock(&self.stores);
        if let Some(packages) = stores.get(&self.key) {
            return Ok(packages.clone());
        }

        match policy {
            InitPolicy::FailIfAbsent => Err(RegistryError::DatabaseMissing {
                location: self.location(),
            }),
            InitPolicy::InitIfAbsent => {
                debug!("Initialized empty in-memory database {}", self.location());
                stores.insert(self.key.clone(), Packages::new());
                Ok(Packages::new())
            }
        }
    }

    fn write(&self, packages: &[PackageRecord]) -> Result<()> {
        lock(&self.stores).insert(self.key.clone(), packages.to_vec());
        Ok(())
    }
}

// A panic while holding the lock cannot leave a half-replaced entry behind,
// since every mutation is a single insert.
fn lock(stores: &Stores) -> MutexGuard<'_, HashMap<PathBuf, Packages>> {
    stores.lock().unwrap_or_else(PoisonError::into_inner)
}
