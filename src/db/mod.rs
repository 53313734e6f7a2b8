//! Storage backends for package databases.
//!
//! [`StorageBackend`] is the contract every database implementation meets;
//! [`BackendKind`] constructs handles for one implementation, and
//! [`DatabaseLocator`] maps a [`DatabaseRef`] onto those constructors.
//!
//! # Structure
//!
//! - `backend` - The capability traits and [`InitPolicy`]
//! - `atomic` - Temp-file-then-rename JSON writes
//! - `json_file` - One JSON file per database
//! - `memory` - Process-local databases
//! - `locator` - Global / user / explicit database resolution

pub mod atomic;
mod backend;
mod json_file;
mod locator;
mod memory;

pub use backend::{BackendKind, InitPolicy, StorageBackend, validate_name};
pub use json_file::{JsonFileBackend, JsonFileKind};
pub use locator::{DatabaseLocator, DatabaseRef};
pub use memory::{MemoryBackend, MemoryKind};
