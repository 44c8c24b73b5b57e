pub mod catalog;
pub mod kv;
pub mod repositories;
pub mod schema;

pub mod mock;

use std::path::Path;
use std::sync::Arc;

use eyre::Result;

pub use catalog::SpaceCatalog;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repositories::{BookingStore, CancellationLog, SessionStore};

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Opens the durable file-backed store under `data_dir`.
pub fn open_store(data_dir: impl AsRef<Path>) -> Result<SharedStore> {
    let store = FileStore::open(data_dir)?;
    Ok(Arc::new(store))
}
