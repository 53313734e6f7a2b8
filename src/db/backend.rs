use std::path::Path;

use crate::error::{RegistryError, Result};
use crate::package::{PackageRecord, Packages};

/// What `read` does when the store does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPolicy {
    /// Create an empty store and read it back as empty.
    InitIfAbsent,
    /// Fail with [`RegistryError::DatabaseMissing`].
    FailIfAbsent,
}

/// A resolved handle bound to exactly one storage location.
///
/// Handles are cheap and short-lived: the locator builds a fresh one for every
/// registry operation, so nothing read through a handle outlives the
/// operation that read it.
pub trait StorageBackend {
    /// Short name of the database, the same as [`BackendKind::name`].
    fn name(&self) -> &str;

    /// Human-readable description of the storage location, used in errors.
    fn location(&self) -> String;

    /// Return every stored record.
    ///
    /// Fails with `DatabaseMissing` (per `policy`), `DatabaseReadError` or
    /// `DatabaseCorrupt`.
    fn read(&self, policy: InitPolicy) -> Result<Packages>;

    /// Replace the stored content with `packages`.
    ///
    /// Implementations must make the replacement atomic: a concurrent reader
    /// observes either the previous content or the new content in full.
    fn write(&self, packages: &[PackageRecord]) -> Result<()>;
}

/// Constructors for one kind of backend.
pub trait BackendKind {
    type Backend: StorageBackend;

    /// Short identifier used to build default store paths.
    fn name(&self) -> &str;

    /// The well-known global store of this kind, if one exists.
    fn global_location(&self) -> Option<Self::Backend>;

    /// Bind a handle to an explicit path. Performs no I/O.
    fn from_path(&self, path: &Path) -> Self::Backend;
}

/// Check that `name` can be used as a file stem.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']);
    if invalid {
        return Err(RegistryError::InvalidBackendName(name.to_string()));
    }
    Ok(())
}
