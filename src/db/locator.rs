use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::backend::BackendKind;

/// Logical selector naming which database to operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseRef {
    Global,
    User,
    Explicit(PathBuf),
}

impl fmt::Display for DatabaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseRef::Global => f.write_str("global"),
            DatabaseRef::User => f.write_str("user"),
            DatabaseRef::Explicit(path) => write!(f, "{}", path.display()),
        }
    }
}

/// `global` and `user` select the scoped databases; anything else is a path.
impl FromStr for DatabaseRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "global" => DatabaseRef::Global,
            "user" => DatabaseRef::User,
            path => DatabaseRef::Explicit(PathBuf::from(path)),
        })
    }
}

/// Resolves [`DatabaseRef`]s to backend handles of one kind.
pub struct DatabaseLocator<K: BackendKind> {
    kind: K,
    user_config_root: PathBuf,
}

impl<K: BackendKind> DatabaseLocator<K> {
    pub fn new(kind: K, user_config_root: PathBuf) -> Self {
        Self {
            kind,
            user_config_root,
        }
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn user_config_root(&self) -> &Path {
        &self.user_config_root
    }

    /// Returns: `<user_config_root>/<name>.db`
    pub fn user_database_path(&self) -> PathBuf {
        self.user_config_root.join(format!("{}.db", self.kind.name()))
    }

    /// Resolve `reference` to a handle.
    ///
    /// Only [`DatabaseRef::Global`] can yield `None`, when the kind has no
    /// global store. Existence of the store is not checked here.
    pub fn locate(&self, reference: &DatabaseRef) -> Option<K::Backend> {
        match reference {
            DatabaseRef::Global => self.kind.global_location(),
            DatabaseRef::User => Some(self.kind.from_path(&self.user_database_path())),
            DatabaseRef::Explicit(path) => Some(self.kind.from_path(path)),
        }
    }
}
