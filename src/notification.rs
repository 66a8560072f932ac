use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::platform::{Notification, Notifier};
use crate::utils::text::notification_preview;

pub const COPY_NOTIFICATION_ID: &str = "copy-notify";
pub const DISMISS_DELAY: Duration = Duration::from_millis(3000);

pub fn copy_notification(text: &str, icon_url: &str) -> Notification {
    Notification {
        kind: "basic".to_string(),
        icon_url: icon_url.to_string(),
        title: String::new(),
        message: notification_preview(text),
    }
}

/// Clear notification `id` once `delay` has elapsed. Never cancelled.
pub fn schedule_dismissal(notifier: Arc<dyn Notifier>, id: &'static str, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = notifier.clear(id).await {
            warn!(id, error = %e, "Failed to clear notification");
        }
    });
}

/// Notifier for hosts without a desktop notification service.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn create(&self, id: &str, notification: Notification) -> Result<()> {
        info!(id, message = %notification.message, "Copied");
        Ok(())
    }

    async fn clear(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}
