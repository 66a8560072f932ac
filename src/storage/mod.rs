pub mod memory;
pub mod sqlite;

use anyhow::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String-keyed store of JSON-encoded values backing the extension settings.
pub trait KvStore: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn clear_all(&mut self) -> Result<()>;
}
