use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::prefs::{self, FilePrefs, PrefStore};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
        ConfigCommands::Path => {
            println!("{}", FilePrefs::path()?.display());
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let prefs = FilePrefs::load_or_default();
    if prefs.values().is_empty() {
        println!("{}", "No preferences set.".dimmed());
    } else {
        for (key, value) in prefs.values() {
            println!("{}: {value}", key.cyan());
        }
    }
    println!();
    println!("{} {}", "File:".dimmed(), FilePrefs::path()?.display());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    validate(key, value)?;
    let mut prefs = FilePrefs::load_or_default();
    prefs.set(key, value);
    println!("{} {key} = {value}", "Saved".green());
    Ok(())
}

fn validate(key: &str, value: &str) -> Result<()> {
    match key {
        prefs::DARK_MODE_KEY => match value {
            prefs::DARK_MODE_ENABLED | prefs::DARK_MODE_DISABLED => Ok(()),
            _ => anyhow::bail!("Invalid value: {value}. Must be 'enabled' or 'disabled'."),
        },
        _ => anyhow::bail!("Unknown preference key: {key}. Valid keys: {}", prefs::DARK_MODE_KEY),
    }
}
