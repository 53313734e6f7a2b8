use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of one *build* of a package.
///
/// Two builds of the same name and version carry different ids.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Package version, compared verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Version half of a name-based selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    Exact(Version),
    /// Every version (and every build) of the name.
    Any,
}

impl VersionSelector {
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionSelector::Exact(v) => v == version,
            VersionSelector::Any => true,
        }
    }
}

impl From<Option<Version>> for VersionSelector {
    fn from(version: Option<Version>) -> Self {
        version.map_or(VersionSelector::Any, VersionSelector::Exact)
    }
}

/// Metadata of one installed package build.
///
/// Only `id`, `name` and `version` are interpreted by the registry; the
/// remaining fields are payload supplied by the installer and stored as-is.
/// Unknown fields are ignored when reading, and empty optional fields are
/// left out when writing, so older and newer record layouts can share a
/// database file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub id: PackageId,
    pub name: PackageName,
    pub version: Version,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exposed_modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<PackageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub library_dirs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_dirs: Vec<String>,
}

impl PackageRecord {
    /// Build a record with an empty payload.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: PackageId::new(id),
            name: PackageName::new(name),
            version: Version::new(version),
            exposed_modules: Vec::new(),
            hidden_modules: Vec::new(),
            depends: Vec::new(),
            license: None,
            description: None,
            homepage: None,
            library_dirs: Vec::new(),
            include_dirs: Vec::new(),
        }
    }

    /// Whether both records denote the same stored entity.
    ///
    /// Only the id takes part; a record re-registered with the same id but
    /// different fields replaces the stored one.
    pub fn same_entity(&self, other: &PackageRecord) -> bool {
        self.id == other.id
    }

    pub fn matches_name(&self, name: &PackageName, version: &VersionSelector) -> bool {
        &self.name == name && version.matches(&self.version)
    }
}

/// All records held by one database, in stored order.
pub type Packages = Vec<PackageRecord>;
