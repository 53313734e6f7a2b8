use anyhow::Result;

use crate::db::{BackendKind, DatabaseLocator, DatabaseRef};
use crate::package::PackageId;
use crate::registry;

use super::render;

/// Resolve every id across `references`, failing if any is missing
#[tracing::instrument(skip(locator))]
pub fn lookup<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    references: &[DatabaseRef],
    ids: &[PackageId],
    json: bool,
) -> Result<()> {
    let packages = registry::batch_lookup(locator, references, ids)?;
    println!("{}", render(&packages, json)?);
    Ok(())
}
