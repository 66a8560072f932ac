//! The background process state: settings, copy history and the platform
//! collaborators, plus the copy/paste dispatchers that operate on them.

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::CopyCache;
use crate::logging::DebugToggle;
use crate::notification::{
    COPY_NOTIFICATION_ID, DISMISS_DELAY, copy_notification, schedule_dismissal,
};
use crate::platform::{ClipboardWriter, Notifier, TabHost, TabMessage, TabQuery};
use crate::settings::{ConfigStore, Settings, keys};
use crate::utils::text::{is_blank, normalize_selection, substitute_placeholders};

pub const DEFAULT_NOTIFICATION_ICON: &str = "img/icon-32.png";

/// How `copy` resolves the text it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    /// Fill `%TITLE%`/`%URL%` from the active tab.
    CurrentTab,
    /// Fill the placeholders once per tab in the current window.
    AllTabs,
    /// Plain copy that is kept out of the history.
    NoCache,
    #[default]
    Plain,
}

impl CopyMode {
    /// Map the mode string sent by content scripts. Unknown or missing
    /// modes are plain copies.
    pub fn from_wire(mode: Option<&str>) -> Self {
        match mode {
            Some("current-tab" | "cur-tau") => CopyMode::CurrentTab,
            Some("all-tabs" | "all-tau") => CopyMode::AllTabs,
            Some("no-cache") => CopyMode::NoCache,
            _ => CopyMode::Plain,
        }
    }
}

pub struct Platform {
    pub clipboard: Box<dyn ClipboardWriter>,
    pub notifier: Arc<dyn Notifier>,
    pub tabs: Arc<dyn TabHost>,
}

pub struct Background {
    config: ConfigStore,
    settings: Settings,
    cache: CopyCache,
    store_cache_on_exit: bool,
    notification_icon: String,
    debug_toggle: DebugToggle,
    clipboard: Box<dyn ClipboardWriter>,
    notifier: Arc<dyn Notifier>,
    tabs: Arc<dyn TabHost>,
}

impl Background {
    /// Load the settings and seed the history from the persisted cache.
    pub fn new(mut config: ConfigStore, platform: Platform) -> Result<Self> {
        let settings = config.load(false)?;
        let cache = CopyCache::from_entries(settings.cache.clone());

        Ok(Self {
            store_cache_on_exit: settings.store_cache_on_exit,
            config,
            settings,
            cache,
            notification_icon: DEFAULT_NOTIFICATION_ICON.to_string(),
            debug_toggle: DebugToggle::default(),
            clipboard: platform.clipboard,
            notifier: platform.notifier,
            tabs: platform.tabs,
        })
    }

    pub fn with_notification_icon(mut self, icon_url: impl Into<String>) -> Self {
        self.notification_icon = icon_url.into();
        self
    }

    pub fn with_debug_toggle(mut self, debug_toggle: DebugToggle) -> Self {
        self.debug_toggle = debug_toggle;
        self
    }

    pub fn cache(&self) -> &CopyCache {
        &self.cache
    }

    /// Copy `text` according to `mode` and return what reached the
    /// clipboard. Blank input copies nothing and returns an empty string.
    pub async fn copy(&mut self, text: &str, mode: CopyMode) -> Result<String> {
        if is_blank(text) {
            return Ok(String::new());
        }

        match mode {
            CopyMode::CurrentTab => {
                let tabs = self.tabs.query(TabQuery::active_in_current_window()).await?;
                let Some(tab) = tabs.first() else {
                    warn!("No active tab to resolve placeholders against");
                    return Ok(String::new());
                };

                let resolved =
                    substitute_placeholders(text, tab.title_or_empty(), tab.url_or_empty());
                self.do_copy(&resolved, false).await
            }
            CopyMode::AllTabs => {
                let tabs = self.tabs.query(TabQuery::current_window()).await?;

                let mut value = String::new();
                for tab in &tabs {
                    value.push_str(&substitute_placeholders(
                        text,
                        tab.title_or_empty(),
                        tab.url_or_empty(),
                    ));
                    value.push('\n');
                }

                self.do_copy(&value, false).await
            }
            CopyMode::NoCache | CopyMode::Plain => {
                let normalized = normalize_selection(text);
                self.do_copy(&normalized, mode == CopyMode::NoCache).await
            }
        }
    }

    async fn do_copy(&mut self, text: &str, no_cache: bool) -> Result<String> {
        debug!(text, no_cache, "Copy string");

        self.clipboard.write_text(text)?;

        if self.settings.show_copy_notification {
            let notification = copy_notification(text, &self.notification_icon);
            if let Err(e) = self.notifier.create(COPY_NOTIFICATION_ID, notification).await {
                warn!(error = %e, "Failed to show copy notification");
            }
            schedule_dismissal(self.notifier.clone(), COPY_NOTIFICATION_ID, DISMISS_DELAY);
        }

        if !no_cache {
            let capacity = self.settings.cache_size;
            if self.cache.is_full(capacity) {
                debug!(capacity, "Cache space is full, re-allocate it");
            }
            self.cache.append(text, capacity);
        }

        Ok(text.to_string())
    }

    /// Put `text` on the clipboard without recording it, then hand the
    /// literal text to the active tab's content script.
    pub async fn paste(&mut self, text: &str) -> Result<String> {
        debug!(text, "Paste from string");
        self.copy(text, CopyMode::NoCache).await?;

        let tabs = self.tabs.query(TabQuery::active_in_current_window()).await?;
        match tabs.first() {
            Some(tab) => {
                debug!(tab_id = tab.id, title = tab.title_or_empty(), "Send paste string");
                self.tabs
                    .send_message(tab.id, TabMessage::Paste(text.to_string()))
                    .await?;
            }
            None => warn!("No active tab to paste into"),
        }

        Ok(text.to_string())
    }

    /// Re-read every option from the store.
    pub fn reload_config(&mut self) -> Result<Settings> {
        let settings = self.config.load(false)?;
        self.apply(settings);
        Ok(self.settings.clone())
    }

    fn apply(&mut self, settings: Settings) {
        if settings.enable_debug != self.settings.enable_debug {
            if let Err(e) = self.debug_toggle.set(settings.enable_debug) {
                warn!(error = %e, "Failed to apply enableDebug");
            }
        }
        self.settings = settings;
    }

    /// Push the current settings to every open tab.
    pub async fn update_config(&mut self) -> Result<()> {
        let tabs = self.tabs.query(TabQuery::everywhere()).await?;
        debug!(count = tabs.len(), "Send update config message to all tabs");

        for tab in tabs {
            let message = TabMessage::Update(self.settings.clone());
            if let Err(e) = self.tabs.send_message(tab.id, message).await {
                warn!(tab_id = tab.id, error = %e, "Failed to send config update");
            }
        }

        Ok(())
    }

    /// Persist a single option, reload, and tell every tab about it.
    pub async fn set_option(&mut self, key: &str, value: &Value) -> Result<Settings> {
        if !keys::ALL.contains(&key) {
            warn!(key, "Storing unrecognized option");
        }
        self.config.set(key, value)?;
        self.reload_config()?;
        self.update_config().await?;
        Ok(self.settings.clone())
    }

    /// Drop every stored option and fall back to defaults. The in-memory
    /// history is left alone.
    pub async fn reset_config(&mut self) -> Result<Settings> {
        let settings = self.config.load(true)?;
        self.apply(settings);
        self.update_config().await?;
        Ok(self.settings.clone())
    }

    /// Browser window closed. Persists the history when `storeCacheOnExit`
    /// was enabled at startup.
    pub fn on_window_removed(&mut self) -> Result<()> {
        if self.store_cache_on_exit {
            debug!(entries = self.cache.len(), "Store the cache when exit");
            self.config.set(keys::CACHE, &self.cache)?;
        }
        Ok(())
    }
}
