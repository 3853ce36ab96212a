//! Core domain model for the registrar academic-records manager.
//!
//! This crate is deliberately free of I/O dependencies. It owns the entity
//! graph (courses, curricular units, professors, students, summaries, users),
//! the indexed repositories that relate them, and the authentication and
//! persistence contracts layered on top. Durable encodings live in sibling
//! crates that implement [`store::StateStore`].
//!
//! The model is single-session and synchronous: a [`system::System`] is meant
//! to be owned and mutated by exactly one caller at a time. It carries no
//! internal locking and is not safe for concurrent use.

pub mod course;
pub mod error;
pub mod professor;
pub mod repo;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod student;
pub mod summary;
pub mod system;
pub mod unit;
pub mod user;

pub use error::{Error, Result};
