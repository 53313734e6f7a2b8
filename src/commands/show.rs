use anyhow::Result;
use log::debug;

use crate::db::{BackendKind, DatabaseLocator, DatabaseRef};
use crate::package::{PackageName, VersionSelector};
use crate::registry;

use super::render;

/// Show the registered builds of a package
#[tracing::instrument(skip(locator))]
pub fn show<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
    name: &PackageName,
    version: &VersionSelector,
    json: bool,
) -> Result<()> {
    let packages = registry::query(locator, reference, name, version)?;
    debug!("{} build(s) of {} matched", packages.len(), name);

    if packages.is_empty() {
        anyhow::bail!("Package {} is not registered in the {} database", name, reference);
    }

    if json {
        println!("{}", render(&packages, true)?);
        return Ok(());
    }

    for (i, p) in packages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("Package: {}", p.name);
        println!("Version: {}", p.version);
        println!("Id: {}", p.id);
        if let Some(description) = &p.description {
            println!("Description: {}", description);
        }
        if let Some(license) = &p.license {
            println!("License: {}", license);
        }
        if let Some(homepage) = &p.homepage {
            println!("Homepage: {}", homepage);
        }
        if !p.exposed_modules.is_empty() {
            println!("Exposed modules: {}", p.exposed_modules.join(", "));
        }
        if !p.depends.is_empty() {
            let depends: Vec<&str> = p.depends.iter().map(|d| d.as_str()).collect();
            println!("Depends: {}", depends.join(", "));
        }
    }
    Ok(())
}
