//! Persistent link cache
//!
//! This module owns the durable `Title -> LinkSet` mapping that makes repeated
//! searches cheap: once an article's outbound links have been fetched they are
//! written here and never fetched again. The [`LinkStore`] trait is the seam;
//! [`SqliteLinkCache`] is the shipping backend.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteLinkCache;
pub use traits::{LinkStore, StorageError, StorageResult};

use std::sync::{Arc, Mutex};

/// A link store shared between the coordinating task and fetch workers
///
/// The cache is the only resource touched from concurrent fetches; the mutex
/// serializes access, and duplicate writes of the same title are a no-op at
/// the store level, so racing workers cannot corrupt a record.
pub type SharedLinkStore = Arc<Mutex<dyn LinkStore + Send>>;

/// Wraps a store for shared use
pub fn shared(store: impl LinkStore + Send + 'static) -> SharedLinkStore {
    Arc::new(Mutex::new(store))
}
