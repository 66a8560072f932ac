use anyhow::{Result, anyhow};
use autocopy::background::{Background, CopyMode, Platform};
use autocopy::bridge::{self, BridgeState, TabRegistry};
use autocopy::cli::{Cli, Commands, ConfigCommand};
use autocopy::clipboard::SystemClipboard;
use autocopy::config::Config;
use autocopy::logging::{self, DebugToggle};
use autocopy::notification::LogNotifier;
use autocopy::settings::{ConfigStore, keys};
use autocopy::storage::SqliteStore;
use clap::Parser;
use dialoguer::Confirm;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let store = match &config.database_path {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::open_default()?,
    };
    let mut options = ConfigStore::new(Box::new(store));

    let debug_toggle = logging::init(options.get(keys::ENABLE_DEBUG, false)?);

    match cli.command {
        Commands::Serve { port } => {
            handle_serve(&config, options, debug_toggle, port).await?;
        }
        Commands::Copy { text, mode } => {
            handle_copy(&config, options, debug_toggle, &text, mode.into()).await?;
        }
        Commands::History => {
            handle_history(&mut options)?;
        }
        Commands::Config { command } => {
            handle_config(&mut options, command)?;
        }
    }

    Ok(())
}

fn build_background(
    config: &Config,
    options: ConfigStore,
    debug_toggle: DebugToggle,
    tabs: Arc<TabRegistry>,
) -> Result<Background> {
    let platform = Platform {
        clipboard: Box::new(SystemClipboard),
        notifier: Arc::new(LogNotifier),
        tabs,
    };
    Ok(Background::new(options, platform)?
        .with_notification_icon(config.notification_icon.clone())
        .with_debug_toggle(debug_toggle))
}

async fn handle_serve(
    config: &Config,
    options: ConfigStore,
    debug_toggle: DebugToggle,
    port: Option<u16>,
) -> Result<()> {
    let tabs = Arc::new(TabRegistry::new());
    let background = build_background(config, options, debug_toggle, tabs.clone())?;

    info!("Starting autocopy bridge");
    let state = BridgeState::new(background, tabs);
    bridge::serve(state, port.unwrap_or(config.port)).await
}

async fn handle_copy(
    config: &Config,
    options: ConfigStore,
    debug_toggle: DebugToggle,
    text: &str,
    mode: CopyMode,
) -> Result<()> {
    let tabs = Arc::new(TabRegistry::new());
    let mut background = build_background(config, options, debug_toggle, tabs)?;

    let copied = background.copy(text, mode).await?;
    background.on_window_removed()?;

    if copied.is_empty() {
        println!("Nothing to copy");
    } else {
        println!("✓ Copied {} characters", copied.chars().count());
    }

    Ok(())
}

fn handle_history(options: &mut ConfigStore) -> Result<()> {
    let settings = options.load(false)?;

    if settings.cache.is_empty() {
        println!("No copies recorded yet!");
        return Ok(());
    }

    for (idx, entry) in settings.cache.iter().enumerate() {
        println!("{:>3}. {}", idx + 1, entry.replace('\n', "⏎"));
    }

    Ok(())
}

fn handle_config(options: &mut ConfigStore, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = options.load(false)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigCommand::Get { key } => {
            let settings = options.load(false)?;
            let value = settings
                .option(&key)
                .ok_or_else(|| anyhow!("Unknown option '{key}'"))?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            let value: Value =
                serde_json::from_str(&value).unwrap_or(Value::String(value));
            let stored = options.set(&key, &value)?;
            println!("✓ {key} = {stored}");
        }
        ConfigCommand::Reset { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("Remove every stored option, including the copy history?")
                    .default(false)
                    .interact()?;

            if confirmed {
                options.load(true)?;
                println!("✓ Options reset to defaults");
            }
        }
    }

    Ok(())
}
