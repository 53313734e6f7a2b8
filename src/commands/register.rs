use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;

use crate::db::{BackendKind, DatabaseLocator, DatabaseRef};
use crate::package::{PackageRecord, Packages};
use crate::registry;
use crate::runtime::Runtime;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    One(Box<PackageRecord>),
    Many(Packages),
}

/// Load package records from a JSON file holding one record or an array.
#[tracing::instrument(skip(runtime))]
pub fn load_records<R: Runtime>(runtime: &R, path: &Path) -> Result<Packages> {
    let content = runtime
        .read_to_string(path)
        .with_context(|| format!("Failed to read package description {:?}", path))?;
    let file: RecordFile = serde_json::from_str(&content)
        .with_context(|| format!("Invalid package description in {:?}", path))?;
    Ok(match file {
        RecordFile::One(record) => vec![*record],
        RecordFile::Many(records) => records,
    })
}

/// Register every record described in `file`
#[tracing::instrument(skip(runtime, locator))]
pub fn register<R: Runtime, K: BackendKind>(
    runtime: &R,
    locator: &DatabaseLocator<K>,
    reference: &DatabaseRef,
    file: &Path,
) -> Result<()> {
    let records = load_records(runtime, file)?;
    debug!("Registering {} record(s) from {:?}", records.len(), file);

    for record in records {
        let label = format!("{} {} ({})", record.name, record.version, record.id);
        match registry::register(locator, reference, record)? {
            Some(_) => println!("Replaced {}", label),
            None => println!("Registered {}", label),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryKind;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    fn runtime_with_file(content: &'static str) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("/tmp/foo.json")))
            .returning(move |_| Ok(content.to_string()));
        runtime
    }

    #[test]
    fn test_load_single_record() {
        let runtime = runtime_with_file(r#"{"id": "1", "name": "foo", "version": "1.0"}"#);
        let records = load_records(&runtime, Path::new("/tmp/foo.json")).unwrap();
        assert_eq!(records, vec![PackageRecord::new("1", "foo", "1.0")]);
    }

    #[test]
    fn test_load_record_array() {
        let runtime = runtime_with_file(
            r#"[{"id": "1", "name": "foo", "version": "1.0"},
                {"id": "2", "name": "bar", "version": "0.1"}]"#,
        );
        let records = load_records(&runtime, Path::new("/tmp/foo.json")).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_invalid_description() {
        let runtime = runtime_with_file(r#"{"name": "foo"}"#);
        assert!(load_records(&runtime, Path::new("/tmp/foo.json")).is_err());
    }

    #[test]
    fn test_register_from_file() {
        let runtime = runtime_with_file(
            r#"[{"id": "1", "name": "foo", "version": "1.0"},
                {"id": "1", "name": "foo", "version": "1.1"}]"#,
        );
        let locator =
            DatabaseLocator::new(MemoryKind::new("packages").unwrap(), PathBuf::from("/cfg"));

        register(&runtime, &locator, &DatabaseRef::User, Path::new("/tmp/foo.json")).unwrap();

        assert_eq!(
            registry::list(&locator, &DatabaseRef::User).unwrap(),
            vec![PackageRecord::new("1", "foo", "1.1")]
        );
    }

    #[test]
    fn test_register_into_missing_global_fails() {
        let runtime = runtime_with_file(r#"{"id": "1", "name": "foo", "version": "1.0"}"#);
        let locator =
            DatabaseLocator::new(MemoryKind::new("packages").unwrap(), PathBuf::from("/cfg"));

        let err = register(&runtime, &locator, &DatabaseRef::Global, Path::new("/tmp/foo.json"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::RegistryError>(),
            Some(crate::error::RegistryError::NullDatabase { .. })
        ));
    }
}
