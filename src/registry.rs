//! Registry operations over any storage backend.
//!
//! Every operation resolves its [`DatabaseRef`] through the locator, reads the
//! current record set, and (for mutations) writes the complete new set back.
//! Nothing is cached between operations.

use log::{debug, info};
use std::collections::HashMap;
use std::fmt;

use crate::db::{BackendKind, DatabaseLocator, DatabaseRef, InitPolicy, StorageBackend};
use crate::error::{RegistryError, Result};
use crate::package::{PackageId, PackageName, PackageRecord, Packages, VersionSelector};

/// Which records `unregister` removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnregisterTarget {
    /// Exactly one build.
    Id(PackageId),
    /// Every build of `name` whose version matches.
    Name {
        name: PackageName,
        version: VersionSelector,
    },
}

impl UnregisterTarget {
    pub fn matches(&self, record: &PackageRecord) -> bool {
        match self {
            UnregisterTarget::Id(id) => &record.id == id,
            UnregisterTarget::Name { name, version } => record.matches_name(name, version),
        }
    }
}

impl fmt::Display for UnregisterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnregisterTarget::Id(id) => write!(f, "{}", id),
            UnregisterTarget::Name {
                name,
                version: VersionSelector::Exact(v),
            } => write!(f, "{}-{}", name, v),
            UnregisterTarget::Name {
                name,
                version: VersionSelector::Any,
            } => write!(f, "{} (any version)", name),
        }
    }
}

fn resolve<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
) -> Result<K::Backend> {
    locator
        .locate(reference)
        .ok_or_else(|| RegistryError::NullDatabase {
            reference: reference.to_string(),
        })
}

/// All records in the database.
///
/// A database that is not configured, or not created yet, lists as empty.
#[tracing::instrument(skip(locator))]
pub fn list<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
) -> Result<Packages> {
    let Some(backend) = locator.locate(reference) else {
        debug!("No {} database configured, nothing to list", reference);
        return Ok(Packages::new());
    };

    match backend.read(InitPolicy::FailIfAbsent) {
        Err(RegistryError::DatabaseMissing { location }) => {
            debug!("Database {} does not exist yet", location);
            Ok(Packages::new())
        }
        other => other,
    }
}

/// Store `record`, replacing any record with the same id.
///
/// Returns the record that was replaced, if any.
#[tracing::instrument(skip(locator, record), fields(id = %record.id))]
pub fn register<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
    record: PackageRecord,
) -> Result<Option<PackageRecord>> {
    let backend = resolve(locator, reference)?;
    let packages = backend.read(InitPolicy::InitIfAbsent)?;

    let (replaced, mut kept): (Packages, Packages) =
        packages.into_iter().partition(|p| p.same_entity(&record));

    info!(
        "Registering {} {} ({}) in {}",
        record.name,
        record.version,
        record.id,
        backend.location()
    );
    kept.push(record);
    backend.write(&kept)?;

    Ok(replaced.into_iter().next())
}

/// Remove every record matching `target`.
///
/// Returns the removed records. When nothing matches the store is not
/// written at all.
#[tracing::instrument(skip(locator))]
pub fn unregister<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
    target: &UnregisterTarget,
) -> Result<Packages> {
    let backend = resolve(locator, reference)?;
    let packages = backend.read(InitPolicy::InitIfAbsent)?;

    let (removed, kept): (Packages, Packages) =
        packages.into_iter().partition(|p| target.matches(p));

    if removed.is_empty() {
        info!("No package matching {} in {}", target, backend.location());
        return Ok(removed);
    }

    info!(
        "Unregistering {} package(s) matching {} from {}",
        removed.len(),
        target,
        backend.location()
    );
    backend.write(&kept)?;
    Ok(removed)
}

/// Look up `ids` across all `references`, in the order requested.
///
/// Fails with `PackageNotFound` on the first id absent from every database;
/// no partial result is returned. When several databases hold the same id,
/// the one listed first wins. Unconfigured databases are skipped.
#[tracing::instrument(skip(locator))]
pub fn batch_lookup<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    references: &[DatabaseRef],
    ids: &[PackageId],
) -> Result<Packages> {
    let mut index: HashMap<PackageId, PackageRecord> = HashMap::new();

    for reference in references {
        let Some(backend) = locator.locate(reference) else {
            debug!("Skipping unconfigured {} database", reference);
            continue;
        };
        for record in backend.read(InitPolicy::InitIfAbsent)? {
            index.entry(record.id.clone()).or_insert(record);
        }
    }

    ids.iter()
        .map(|id| {
            index
                .get(id)
                .cloned()
                .ok_or_else(|| RegistryError::PackageNotFound(id.clone()))
        })
        .collect()
}

/// The record with `id`, if stored.
pub fn lookup<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
    id: &PackageId,
) -> Result<Option<PackageRecord>> {
    Ok(list(locator, reference)?
        .into_iter()
        .find(|p| &p.id == id))
}

/// Records named `name` whose version matches `version`.
pub fn query<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
    name: &PackageName,
    version: &VersionSelector,
) -> Result<Packages> {
    Ok(list(locator, reference)?
        .into_iter()
        .filter(|p| p.matches_name(name, version))
        .collect())
}
