//! Atomic JSON file writes.
//!
//! Content is always written to a sibling temp file (`<file>.<pid>.tmp`)
//! first and then moved into place, so the target path only ever holds a
//! complete document:
//!
//! - [`write_json`] renames the temp file over the target.
//! - [`create_json`] hard-links the temp file to the target, which fails
//!   instead of clobbering a store another process created meanwhile.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process;

use crate::runtime::Runtime;

/// Path of the temp file staged next to `path`.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(format!(".{}.tmp", process::id()));
    path.with_file_name(name)
}

/// Replace `path` with the pretty-printed JSON encoding of `data`.
#[tracing::instrument(skip(runtime, data))]
pub fn write_json<R: Runtime, T: Serialize + ?Sized>(
    runtime: &R,
    path: &Path,
    data: &T,
) -> Result<()> {
    let temp = stage(runtime, path, data)?;

    if let Err(e) = runtime.rename(&temp, path) {
        discard(runtime, &temp);
        return Err(e).with_context(|| format!("Failed to move {:?} into place", temp));
    }

    debug!("Atomically wrote {:?}", path);
    Ok(())
}

/// Create `path` holding `data` unless it already exists.
///
/// Returns `false` when another writer created the file first; its content is
/// left untouched.
#[tracing::instrument(skip(runtime, data))]
pub fn create_json<R: Runtime, T: Serialize + ?Sized>(
    runtime: &R,
    path: &Path,
    data: &T,
) -> Result<bool> {
    let temp = stage(runtime, path, data)?;

    let linked = runtime.hard_link(&temp, path);
    let created = match linked {
        Ok(()) => true,
        Err(_) if runtime.exists(path) => false,
        Err(e) => {
            // Filesystems without hard links: fall back to a plain rename.
            debug!("Hard link to {:?} failed ({:#}), renaming instead", path, e);
            if let Err(e) = runtime.rename(&temp, path) {
                discard(runtime, &temp);
                return Err(e).with_context(|| format!("Failed to create {:?}", path));
            }
            return Ok(true);
        }
    };

    discard(runtime, &temp);
    Ok(created)
}

fn stage<R: Runtime, T: Serialize + ?Sized>(
    runtime: &R,
    path: &Path,
    data: &T,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !runtime.exists(parent)
    {
        runtime
            .create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let content = serde_json::to_string_pretty(data)?;
    let temp = temp_path(path);
    if let Err(e) = runtime.write(&temp, content.as_bytes()) {
        discard(runtime, &temp);
        return Err(e).with_context(|| format!("Failed to write {:?}", temp));
    }
    Ok(temp)
}

fn discard<R: Runtime>(runtime: &R, temp: &Path) {
    if runtime.exists(temp)
        && let Err(e) = runtime.remove_file(temp)
    {
        warn!("Failed to remove temp file {:?}: {}", temp, e);
    }
}
