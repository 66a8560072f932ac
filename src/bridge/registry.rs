use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::platform::{Tab, TabHost, TabId, TabMessage, TabQuery, WindowId};

#[derive(Default)]
struct RegistryState {
    tabs: BTreeMap<TabId, Tab>,
    outboxes: HashMap<TabId, Vec<TabMessage>>,
    current_window: Option<WindowId>,
}

/// Tabs announced by content scripts, with a queue of pending messages
/// per tab that the script collects by polling.
#[derive(Default)]
pub struct TabRegistry {
    state: Mutex<RegistryState>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>> {
        self.state
            .lock()
            .map_err(|e| anyhow!("Tab registry mutex poisoned: {e}"))
    }

    /// Insert or refresh a tab. An active tab deactivates its siblings;
    /// a focused one (or the very first one seen) makes its window current.
    pub fn upsert(&self, tab: Tab, focused: bool) -> Result<()> {
        let mut state = self.lock()?;

        if tab.active {
            for other in state.tabs.values_mut() {
                if other.window_id == tab.window_id && other.id != tab.id {
                    other.active = false;
                }
            }
        }

        if focused || state.current_window.is_none() {
            state.current_window = Some(tab.window_id);
        }

        debug!(tab_id = tab.id, window_id = tab.window_id, active = tab.active, "Tab announced");
        state.tabs.insert(tab.id, tab);
        Ok(())
    }

    pub fn remove(&self, tab_id: TabId) -> Result<Option<Tab>> {
        let mut state = self.lock()?;
        state.outboxes.remove(&tab_id);
        Ok(state.tabs.remove(&tab_id))
    }

    /// Forget every tab of a closed window. Returns how many were dropped.
    pub fn remove_window(&self, window_id: WindowId) -> Result<usize> {
        let mut state = self.lock()?;

        let closed: Vec<TabId> = state
            .tabs
            .values()
            .filter(|tab| tab.window_id == window_id)
            .map(|tab| tab.id)
            .collect();

        for id in &closed {
            state.tabs.remove(id);
            state.outboxes.remove(id);
        }

        if state.current_window == Some(window_id) {
            state.current_window = state.tabs.values().next().map(|tab| tab.window_id);
        }

        Ok(closed.len())
    }

    /// Take every message queued for `tab_id`.
    pub fn drain(&self, tab_id: TabId) -> Result<Vec<TabMessage>> {
        let mut state = self.lock()?;
        Ok(state.outboxes.remove(&tab_id).unwrap_or_default())
    }

    pub fn current_window(&self) -> Result<Option<WindowId>> {
        Ok(self.lock()?.current_window)
    }

    #[cfg(test)]
    pub fn tabs(&self) -> Result<Vec<Tab>> {
        Ok(self.lock()?.tabs.values().cloned().collect())
    }
}

#[async_trait]
impl TabHost for TabRegistry {
    async fn query(&self, query: TabQuery) -> Result<Vec<Tab>> {
        let state = self.lock()?;

        let tabs = state
            .tabs
            .values()
            .filter(|tab| !query.current_window || Some(tab.window_id) == state.current_window)
            .filter(|tab| query.active.is_none_or(|active| tab.active == active))
            .cloned()
            .collect();

        Ok(tabs)
    }

    async fn send_message(&self, tab_id: TabId, message: TabMessage) -> Result<()> {
        let mut state = self.lock()?;

        if !state.tabs.contains_key(&tab_id) {
            return Err(anyhow!("No tab with id {tab_id}"));
        }

        state.outboxes.entry(tab_id).or_default().push(message);
        Ok(())
    }
}
