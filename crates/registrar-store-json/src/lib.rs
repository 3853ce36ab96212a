//! JSON-file backend for the registrar state store.
//!
//! Serializes the whole snapshot to a single file, replacing it atomically
//! on every save. There is no partial write: a failure mid-save leaves the
//! previously saved snapshot untouched.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;
