use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::db::{DatabaseLocator, JsonFileKind};
use crate::runtime::Runtime;

/// Database name used when none is configured.
pub const DEFAULT_DB_NAME: &str = "packages";

/// Directory under the platform config dir holding user databases.
pub const APP_DIR: &str = "pkgreg";

pub const ENV_CONFIG_DIR: &str = "PKGREG_CONFIG_DIR";
pub const ENV_GLOBAL_DB: &str = "PKGREG_GLOBAL_DB";
pub const ENV_DB_NAME: &str = "PKGREG_DB_NAME";

/// Values supplied explicitly by the caller, e.g. from command-line flags.
///
/// Each one takes precedence over its environment variable.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_dir: Option<PathBuf>,
    pub global_db: Option<PathBuf>,
    pub db_name: Option<String>,
}

/// Resolved process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub user_config_root: PathBuf,
    pub global_db: Option<PathBuf>,
    pub db_name: String,
}

impl Settings {
    #[tracing::instrument(skip(runtime))]
    pub fn resolve<R: Runtime>(runtime: &R, overrides: Overrides) -> Result<Self> {
        let db_name = match overrides.db_name {
            Some(name) => name,
            None => runtime
                .env_var(ENV_DB_NAME)
                .unwrap_or_else(|_| DEFAULT_DB_NAME.to_string()),
        };

        let user_config_root = match overrides.config_dir {
            Some(dir) => dir,
            None => match runtime.env_var(ENV_CONFIG_DIR) {
                Ok(dir) => PathBuf::from(dir),
                Err(_) => runtime
                    .config_dir()
                    .context("Could not find the user configuration directory")?
                    .join(APP_DIR),
            },
        };

        let global_db = match overrides.global_db {
            Some(path) => Some(path),
            None => match runtime.env_var(ENV_GLOBAL_DB) {
                Ok(path) => Some(PathBuf::from(path)),
                Err(_) => {
                    let default = system_global_db(&db_name);
                    runtime.exists(&default).then_some(default)
                }
            },
        };

        debug!(
            "Resolved settings: config root {:?}, global database {:?}, name {}",
            user_config_root, global_db, db_name
        );

        Ok(Self {
            user_config_root,
            global_db,
            db_name,
        })
    }

    /// Locator over JSON file databases for these settings.
    pub fn locator<'a, R: Runtime>(
        &self,
        runtime: &'a R,
    ) -> Result<DatabaseLocator<JsonFileKind<'a, R>>> {
        let kind = JsonFileKind::new(runtime, self.db_name.clone())?
            .with_global_path(self.global_db.clone());
        Ok(DatabaseLocator::new(kind, self.user_config_root.clone()))
    }
}

#[cfg(target_os = "windows")]
fn system_global_db(name: &str) -> PathBuf {
    PathBuf::from(r"C:\ProgramData\pkgreg").join(format!("{}.db", name))
}

#[cfg(not(target_os = "windows"))]
fn system_global_db(name: &str) -> PathBuf {
    PathBuf::from("/var/lib/pkgreg").join(format!("{}.db", name))
}
