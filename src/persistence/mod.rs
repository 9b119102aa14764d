//! Persistence - Key/Value Storage for UI Layout
//!
//! The grid never touches a global store directly. It is handed a
//! [`PersistenceCapability`] so the same code runs against the on-disk store
//! in the app and against [`MemoryStore`] in tests.
//!
//! ```text
//! ColumnLayoutStore ──get/set/remove──▶ dyn PersistenceCapability
//!                                          ├── FileStore   (config dir, one JSON file per key)
//!                                          └── MemoryStore (in-process)
//! ```

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use crate::error::Result;

/// Minimal string store scoped by key
pub trait PersistenceCapability: Send + Sync + 'static {
    /// Read a value; `Ok(None)` when the key was never written or was removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; deleting an absent key succeeds
    fn remove(&self, key: &str) -> Result<()>;
}
