use anyhow::Result;
use log::debug;

use crate::db::{BackendKind, DatabaseLocator, DatabaseRef};
use crate::registry;

use super::render;

/// List all packages registered in a database
#[tracing::instrument(skip(locator))]
pub fn list<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
    json: bool,
) -> Result<()> {
    let packages = registry::list(locator, reference)?;
    debug!("Found {} package(s) in {} database", packages.len(), reference);

    if packages.is_empty() && !json {
        println!("No packages registered.");
        return Ok(());
    }

    println!("{}", render(&packages, json)?);
    Ok(())
}
