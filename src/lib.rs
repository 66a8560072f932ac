pub mod background;
pub mod bridge;
pub mod cache;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod notification;
pub mod platform;
pub mod router;
pub mod settings;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod testing;
