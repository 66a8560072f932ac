use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::background::{Background, Platform};
use crate::bridge::TabRegistry;
use crate::platform::{
    ClipboardWriter, Notification, Notifier, Tab, TabHost, TabId, TabMessage, TabQuery, WindowId,
};
use crate::settings::ConfigStore;
use crate::storage::MemoryStore;

pub fn tab(id: TabId, window_id: WindowId, title: &str, url: &str, active: bool) -> Tab {
    Tab {
        id,
        window_id,
        url: Some(url.to_string()),
        title: Some(title.to_string()),
        active,
    }
}

#[derive(Clone, Default)]
pub struct RecordingClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    fail_create: bool,
    created: Mutex<Vec<(String, Notification)>>,
    cleared: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Rejects every `create` call but still records clears.
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn create(&self, id: &str, notification: Notification) -> Result<()> {
        if self.fail_create {
            return Err(anyhow!("notifications unavailable"));
        }
        self.created.lock().unwrap().push((id.to_string(), notification));
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<()> {
        self.cleared.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

/// Tab host that refuses messages for one tab and delegates the rest.
pub struct RejectingTabs {
    inner: Arc<TabRegistry>,
    rejected: TabId,
}

#[async_trait]
impl TabHost for RejectingTabs {
    async fn query(&self, query: TabQuery) -> Result<Vec<Tab>> {
        self.inner.query(query).await
    }

    async fn send_message(&self, tab_id: TabId, message: TabMessage) -> Result<()> {
        if tab_id == self.rejected {
            return Err(anyhow!("content script in tab {tab_id} is gone"));
        }
        self.inner.send_message(tab_id, message).await
    }
}

pub struct TestHarness {
    pub background: Background,
    pub tabs: Arc<TabRegistry>,
    clipboard: RecordingClipboard,
    notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self::with_store(MemoryStore::new(), tabs)
    }

    pub fn with_store(store: MemoryStore, tabs: Vec<Tab>) -> Self {
        let registry = seeded_registry(tabs);
        Self::assemble(store, registry.clone(), registry, RecordingNotifier::default())
    }

    pub fn with_failing_notifier(tabs: Vec<Tab>) -> Self {
        let registry = seeded_registry(tabs);
        Self::assemble(MemoryStore::new(), registry.clone(), registry, RecordingNotifier::failing())
    }

    pub fn rejecting_messages_to(rejected: TabId, tabs: Vec<Tab>) -> Self {
        let registry = seeded_registry(tabs);
        let host = Arc::new(RejectingTabs {
            inner: registry.clone(),
            rejected,
        });
        Self::assemble(MemoryStore::new(), registry, host, RecordingNotifier::default())
    }

    fn assemble(
        store: MemoryStore,
        registry: Arc<TabRegistry>,
        host: Arc<dyn TabHost>,
        notifier: RecordingNotifier,
    ) -> Self {
        let clipboard = RecordingClipboard::default();
        let notifier = Arc::new(notifier);
        let platform = Platform {
            clipboard: Box::new(clipboard.clone()),
            notifier: notifier.clone(),
            tabs: host,
        };
        let background = Background::new(ConfigStore::new(Box::new(store)), platform).unwrap();

        Self {
            background,
            tabs: registry,
            clipboard,
            notifier,
        }
    }

    pub fn clipboard_writes(&self) -> Vec<String> {
        self.clipboard.writes.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<(String, Notification)> {
        self.notifier.created.lock().unwrap().clone()
    }

    pub fn cleared_notifications(&self) -> Vec<String> {
        self.notifier.cleared.lock().unwrap().clone()
    }
}

fn seeded_registry(tabs: Vec<Tab>) -> Arc<TabRegistry> {
    let registry = Arc::new(TabRegistry::new());
    for tab in tabs {
        registry.upsert(tab, false).unwrap();
    }
    registry
}
