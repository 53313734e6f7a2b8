use anyhow::Result;

use crate::db::{BackendKind, DatabaseLocator, DatabaseRef};
use crate::registry::{self, UnregisterTarget};

/// Unregister packages matching `target`
#[tracing::instrument(skip(locator))]
pub fn unregister<K: BackendKind>(
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
    target: &UnregisterTarget,
) -> Result<()> {
    let removed = registry::unregister(locator, reference, target)?;

    if removed.is_empty() {
        println!("No package matching {} in the {} database.", target, reference);
        return Ok(());
    }

    for p in &removed {
        println!("Unregistered {} {} ({})", p.name, p.version, p.id);
    }
    Ok(())
}
