pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod package;
pub mod registry;
pub mod runtime;

pub use error::{RegistryError, Result};

/// Test utilities shared by unit tests.
#[cfg(test)]
pub mod test_utils {
    use crate::package::{PackageRecord, Packages};
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    /// Returns the platform config directory used by mocked runtimes.
    /// - Unix: `/home/user/.config`
    /// - Windows: `C:\Users\user\AppData\Roaming`
    pub fn test_config_dir() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/home/user/.config")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\Users\user\AppData\Roaming")
        }
    }

    /// The three records used across registry tests:
    /// two builds of `foo` at different versions and one `bar`.
    pub fn sample_packages() -> Packages {
        vec![
            PackageRecord::new("1", "foo", "1.0"),
            PackageRecord::new("2", "foo", "2.0"),
            PackageRecord::new("3", "bar", "1.0"),
        ]
    }

    /// Configure a mock runtime with common defaults for tests.
    /// - no `PKGREG_*` environment variables
    /// - config dir set to [`test_config_dir`]
    pub fn configure_mock_runtime_basics(runtime: &mut MockRuntime) {
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));

        runtime
            .expect_config_dir()
            .returning(|| Some(test_config_dir()));
    }
}
