use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::background::{Background, CopyMode};
use crate::settings::Settings;

/// Command sent by a content script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub command: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl Request {
    fn text(&self) -> &str {
        self.data.as_ref().and_then(Value::as_str).unwrap_or_default()
    }
}

/// Dispatch one request. Only `load` produces a reply.
pub async fn handle_request(background: &mut Background, request: &Request) -> Result<Option<Settings>> {
    match request.command.as_str() {
        "copy" => {
            debug!("Request to copy string from content script");
            let mode = CopyMode::from_wire(request.mode.as_deref());
            background.copy(request.text(), mode).await?;
            Ok(None)
        }
        "load" => {
            debug!("Request to load config from content script");
            let settings = background.reload_config()?;
            Ok(Some(settings))
        }
        other => {
            debug!(command = other, "Ignoring unknown command");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::TabMessage;
    use crate::settings::keys;
    use crate::testing::{TestHarness, tab};
    use serde_json::json;

    fn request(value: Value) -> Request {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_copy_command_has_no_reply() {
        let mut h = TestHarness::new(vec![]);

        let reply = handle_request(
            &mut h.background,
            &request(json!({"command": "copy", "data": "hello"})),
        )
        .await
        .unwrap();

        assert!(reply.is_none());
        assert_eq!(h.clipboard_writes(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_copy_command_honours_mode() {
        let mut h = TestHarness::new(vec![tab(7, 1, "Ex", "http://e.com", true)]);

        handle_request(
            &mut h.background,
            &request(json!({"command": "copy", "data": "%URL%", "mode": "cur-tau"})),
        )
        .await
        .unwrap();

        assert_eq!(h.clipboard_writes(), vec!["http://e.com".to_string()]);
    }

    #[tokio::test]
    async fn test_load_command_replies_with_fresh_settings() {
        let mut h = TestHarness::new(vec![tab(1, 1, "t", "u", true)]);
        h.background.set_option(keys::COPY_ON_SELECT, &json!(false)).await.unwrap();
        h.tabs.drain(1).unwrap();

        let reply = handle_request(&mut h.background, &request(json!({"command": "load"})))
            .await
            .unwrap()
            .unwrap();

        assert!(!reply.copy_on_select);
        let pending: Vec<TabMessage> = h.tabs.drain(1).unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() {
        let mut h = TestHarness::new(vec![]);

        let reply = handle_request(
            &mut h.background,
            &request(json!({"command": "explode", "data": "x"})),
        )
        .await
        .unwrap();

        assert!(reply.is_none());
        assert!(h.clipboard_writes().is_empty());
    }

    #[tokio::test]
    async fn test_non_string_payload_copies_nothing() {
        let mut h = TestHarness::new(vec![]);

        handle_request(&mut h.background, &request(json!({"command": "copy", "data": 42})))
            .await
            .unwrap();

        assert!(h.clipboard_writes().is_empty());
    }
}
