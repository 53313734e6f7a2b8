//! Package record model.
//!
//! Value types describing one installed package build, plus the selector used
//! to match records by name and version.

mod record;

pub use record::{PackageId, PackageName, PackageRecord, Packages, Version, VersionSelector};
