use super::KvStore;
use anyhow::Result;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        self.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("enable").unwrap(), None);

        store.set_item("enable", "false").unwrap();
        store.set_item("enable", "true").unwrap();
        assert_eq!(store.get_item("enable").unwrap().as_deref(), Some("true"));
        assert_eq!(store.len(), 1);

        store.clear_all().unwrap();
        assert!(store.is_empty());
    }
}
