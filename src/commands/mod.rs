//! Command implementations behind the `pkgreg` binary.
//!
//! Commands are thin: they call into [`crate::registry`] and print the
//! outcome. Records are printed one per line as `id name version`, or as a
//! JSON array when `json` is set.

use anyhow::Result;

use crate::package::PackageRecord;

mod list;
mod lookup;
mod register;
mod show;
mod unregister;

pub use list::list;
pub use lookup::lookup;
pub use register::{load_records, register};
pub use show::show;
pub use unregister::unregister;

/// Render `packages` for terminal output.
pub fn render(packages: &[PackageRecord], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(packages)?);
    }
    Ok(packages
        .iter()
        .map(|p| format!("{} {} {}", p.id, p.name, p.version))
        .collect::<Vec<_>>()
        .join("\n"))
}
