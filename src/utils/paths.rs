use anyhow::{Result, anyhow};
use std::fs;
use std::path::PathBuf;

pub fn get_autocopy_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".autocopy"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let dir = get_autocopy_dir()?;
    Ok(dir.join("config.toml"))
}

pub fn get_settings_db_path() -> Result<PathBuf> {
    let dir = get_autocopy_dir()?;
    Ok(dir.join("settings.db"))
}

pub fn ensure_directories_exist() -> Result<()> {
    let dir = get_autocopy_dir()?;

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    Ok(())
}
