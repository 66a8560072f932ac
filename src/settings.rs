//! Extension settings and the store that persists them one key at a time.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::KvStore;

pub mod keys {
    pub const ENABLE: &str = "enable";
    pub const CACHE_SIZE: &str = "cacheSize";
    pub const COPY_ON_SELECT: &str = "copyOnSelect";
    pub const COPY_ON_SHIFT_SELECT: &str = "copyOnShiftSelect";
    pub const COPY_ON_SELECT_IN_BOX: &str = "copyOnSelectInBox";
    pub const COPY_TITLE_RAW_FMT: &str = "copyTitleRawFmt";
    pub const COPY_TITLE_FMT: &str = "copyTitleFmt";
    pub const ENABLE_DEBUG: &str = "enableDebug";
    pub const STORE_CACHE_ON_EXIT: &str = "storeCacheOnExit";
    pub const CACHE: &str = "cache";
    pub const SHOW_COPY_NOTIFICATION: &str = "showCopyNotification";

    pub const ALL: [&str; 11] = [
        ENABLE,
        CACHE_SIZE,
        COPY_ON_SELECT,
        COPY_ON_SHIFT_SELECT,
        COPY_ON_SELECT_IN_BOX,
        COPY_TITLE_RAW_FMT,
        COPY_TITLE_FMT,
        ENABLE_DEBUG,
        STORE_CACHE_ON_EXIT,
        CACHE,
        SHOW_COPY_NOTIFICATION,
    ];
}

/// The full configuration record handed to content scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_true")]
    pub enable: bool,

    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    #[serde(default = "default_true")]
    pub copy_on_select: bool,

    #[serde(default = "default_true")]
    pub copy_on_shift_select: bool,

    #[serde(default)]
    pub copy_on_select_in_box: bool,

    #[serde(default = "default_copy_title_raw_fmt")]
    pub copy_title_raw_fmt: String,

    #[serde(default = "default_copy_title_fmt")]
    pub copy_title_fmt: String,

    #[serde(default)]
    pub enable_debug: bool,

    #[serde(default = "default_true")]
    pub store_cache_on_exit: bool,

    #[serde(default)]
    pub cache: Vec<String>,

    #[serde(default = "default_true")]
    pub show_copy_notification: bool,
}

fn default_true() -> bool {
    true
}

fn default_cache_size() -> usize {
    10
}

fn default_copy_title_raw_fmt() -> String {
    "%TITLE% - %URL%".to_string()
}

fn default_copy_title_fmt() -> String {
    r#"<a href="%URL%" title="%TITLE%" target="_blank">%TITLE%</a>"#.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable: default_true(),
            cache_size: default_cache_size(),
            copy_on_select: default_true(),
            copy_on_shift_select: default_true(),
            copy_on_select_in_box: false,
            copy_title_raw_fmt: default_copy_title_raw_fmt(),
            copy_title_fmt: default_copy_title_fmt(),
            enable_debug: false,
            store_cache_on_exit: default_true(),
            cache: Vec::new(),
            show_copy_notification: default_true(),
        }
    }
}

impl Settings {
    /// Look up a single option by its wire name.
    pub fn option(&self, key: &str) -> Option<serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut map)) => map.remove(key),
            _ => None,
        }
    }
}

pub struct ConfigStore {
    store: Box<dyn KvStore>,
}

impl ConfigStore {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Stored value for `key`, or `default` when absent.
    ///
    /// A value that no longer parses as `T` is reported and treated as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(default);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, raw = %raw, error = %e, "Stored option is malformed, using default");
                Ok(default)
            }
        }
    }

    /// Serialize and persist `value`, returning the serialized form.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<String> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize option '{key}'"))?;
        self.store.set_item(key, &raw)?;
        debug!(key, value = %raw, "Option stored");
        Ok(raw)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.clear_all()
    }

    pub fn load(&mut self, reset: bool) -> Result<Settings> {
        if reset {
            debug!("Resetting stored options");
            self.clear()?;
        }

        let defaults = Settings::default();
        Ok(Settings {
            enable: self.get(keys::ENABLE, defaults.enable)?,
            cache_size: self.get(keys::CACHE_SIZE, defaults.cache_size)?,
            copy_on_select: self.get(keys::COPY_ON_SELECT, defaults.copy_on_select)?,
            copy_on_shift_select: self
                .get(keys::COPY_ON_SHIFT_SELECT, defaults.copy_on_shift_select)?,
            copy_on_select_in_box: self
                .get(keys::COPY_ON_SELECT_IN_BOX, defaults.copy_on_select_in_box)?,
            copy_title_raw_fmt: self
                .get(keys::COPY_TITLE_RAW_FMT, defaults.copy_title_raw_fmt)?,
            copy_title_fmt: self.get(keys::COPY_TITLE_FMT, defaults.copy_title_fmt)?,
            enable_debug: self.get(keys::ENABLE_DEBUG, defaults.enable_debug)?,
            store_cache_on_exit: self
                .get(keys::STORE_CACHE_ON_EXIT, defaults.store_cache_on_exit)?,
            cache: self.get(keys::CACHE, defaults.cache)?,
            show_copy_notification: self
                .get(keys::SHOW_COPY_NOTIFICATION, defaults.show_copy_notification)?,
        })
    }
}
