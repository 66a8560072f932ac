//! Seams to the host platform: tabs and messaging, notifications, clipboard.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

pub type TabId = u64;
pub type WindowId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub window_id: WindowId,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Tab {
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn url_or_empty(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}

/// Which tabs a query selects. Queries are always scoped to the
/// current window unless `current_window` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabQuery {
    pub active: Option<bool>,
    pub current_window: bool,
}

impl TabQuery {
    pub fn active_in_current_window() -> Self {
        Self {
            active: Some(true),
            current_window: true,
        }
    }

    pub fn current_window() -> Self {
        Self {
            active: None,
            current_window: true,
        }
    }

    pub fn everywhere() -> Self {
        Self {
            active: None,
            current_window: false,
        }
    }
}

/// Message pushed from the background process to a content script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "lowercase")]
pub enum TabMessage {
    Update(Settings),
    Paste(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub icon_url: String,
    pub title: String,
    pub message: String,
}

#[async_trait]
pub trait TabHost: Send + Sync {
    async fn query(&self, query: TabQuery) -> Result<Vec<Tab>>;
    async fn send_message(&self, tab_id: TabId, message: TabMessage) -> Result<()>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn create(&self, id: &str, notification: Notification) -> Result<()>;
    async fn clear(&self, id: &str) -> Result<()>;
}

pub trait ClipboardWriter: Send {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_paste_message_wire_format() {
        let msg = TabMessage::Paste("hello".to_string());
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"command": "paste", "data": "hello"})
        );
    }

    #[test]
    fn test_update_message_carries_settings() {
        let msg = TabMessage::Update(Settings::default());
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["command"], "update");
        assert_eq!(value["data"]["cacheSize"], 10);
    }

    #[test]
    fn test_tab_without_title() {
        let tab: Tab = serde_json::from_value(json!({"id": 3, "windowId": 1})).unwrap();
        assert_eq!(tab.title_or_empty(), "");
        assert_eq!(tab.url_or_empty(), "");
        assert!(!tab.active);
    }

    #[test]
    fn test_notification_wire_format() {
        let n = Notification {
            kind: "basic".to_string(),
            icon_url: "img/icon-32.png".to_string(),
            title: String::new(),
            message: "hi...".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&n).unwrap(),
            json!({"type": "basic", "iconUrl": "img/icon-32.png", "title": "", "message": "hi..."})
        );
    }
}
