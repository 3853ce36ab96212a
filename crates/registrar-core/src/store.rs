//! The `StateStore` trait — the persistence seam.
//!
//! Implemented by storage backends (e.g. `registrar-store-json`). The core
//! treats the durable encoding as opaque: any store that round-trips a
//! [`Snapshot`] bit-for-bit in meaning (entities and their key-based
//! cross-references) satisfies the contract.
//!
//! Both operations are synchronous and whole-blob; there is no partial
//! write or incremental read. A store whose `save` fails must leave any
//! previously saved snapshot intact.

use crate::snapshot::Snapshot;

/// Abstraction over a durable home for system snapshots.
pub trait StateStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist the snapshot, replacing whatever was saved before.
  fn save(&self, snapshot: &Snapshot) -> Result<(), Self::Error>;

  /// Load the most recently saved snapshot.
  fn load(&self) -> Result<Snapshot, Self::Error>;
}
