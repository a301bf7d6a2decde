//! Command-line interface for inspecting bind data
//!
//! Supports:
//! - Listing the records in a bind store
//! - Encoding a human chord (`ctrl+shift+s`) into a save string
//! - Decoding a save string into its display form
//! - Showing and editing the repeat defaults in `config.yaml`

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::bind::{parse_key_string, ControllerDevice};
use crate::config::InputConfig;
use crate::manager::BindManager;
use crate::store::{BindSaveData, JsonFileStore};

/// Inspect and convert keybind data
#[derive(Parser, Debug)]
#[command(name = "keybinds", version, about = "Inspect and convert keybind data")]
pub struct CliArgs {
    /// Bind store to read (defaults to binds.json in the config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every persisted action record
    List,
    /// Convert a chord like `ctrl+shift+s` or `pad+a` into a save string
    Encode {
        #[arg(value_name = "CHORD")]
        chord: String,
    },
    /// Convert a save string like `keyboard:1|83` into its display form
    Decode {
        #[arg(value_name = "SAVE_STRING")]
        data: String,
    },
    /// Show the input config, updating the repeat defaults if any are given
    Config(ConfigChanges),
}

/// Repeat defaults to change; unset fields are left alone
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigChanges {
    /// Enable or disable key repeat
    #[arg(long, value_name = "BOOL")]
    pub repeat: Option<bool>,
    /// Milliseconds before the first repeat
    #[arg(long, value_name = "MS")]
    pub delay: Option<u64>,
    /// Milliseconds between repeats
    #[arg(long, value_name = "MS")]
    pub rate: Option<u64>,
}

impl ConfigChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, config: &mut InputConfig) {
        if let Some(enabled) = self.repeat {
            config.repeat.enabled = enabled;
        }
        if let Some(delay) = self.delay {
            config.repeat.delay = delay;
        }
        if let Some(rate) = self.rate {
            config.repeat.rate = rate;
        }
    }
}

/// Manager with every built-in device attached
fn decoder() -> BindManager {
    let mut manager = BindManager::new();
    manager.attach_device(Box::new(ControllerDevice));
    manager
}

/// Save string for a human-readable chord
pub fn encode(chord: &str) -> Result<String, String> {
    let bind = parse_key_string(chord).map_err(|e| format!("{}: {}", chord, e))?;
    Ok(decoder().get_bind_save_string(&bind))
}

/// Display form of a save string
pub fn decode(data: &str) -> Result<String, String> {
    decoder()
        .load_bind_from_save_string(data)
        .map(|bind| bind.to_string())
        .ok_or_else(|| format!("Not a valid bind: {}", data))
}

/// Load the config at `path`, apply `changes` and write it back when
/// anything changed. Returns the resulting config as YAML.
pub fn configure(path: &Path, changes: &ConfigChanges) -> Result<String, String> {
    let mut config = InputConfig::load_from(path);
    if !changes.is_empty() {
        changes.apply(&mut config);
        config.save_to(path)?;
    }
    serde_yaml::to_string(&config).map_err(|e| format!("Failed to serialize config: {}", e))
}

/// One line per stored action: `id: bind, bind [repeat ...]`
pub fn list(store: &JsonFileStore) -> Vec<String> {
    store
        .entries()
        .map(|(action, value)| format_record(action, value))
        .collect()
}

fn format_record(action: &str, value: &Value) -> String {
    let data: BindSaveData = match serde_json::from_value(value.clone()) {
        Ok(data) => data,
        Err(e) => return format!("{}: <invalid record: {}>", action, e),
    };

    let manager = decoder();
    let binds: Vec<String> = data
        .binds
        .iter()
        .map(|entry| match manager.load_bind_from_save_string(entry) {
            Some(bind) => bind.to_string(),
            None => format!("<{}>", entry),
        })
        .collect();

    let mut line = format!("{}: {}", action, binds.join(", "));
    if let Some(repeat) = data.repeat {
        line.push_str(&format!(
            " [repeat {} delay={}ms rate={}ms]",
            if repeat.enabled { "on" } else { "off" },
            repeat.delay,
            repeat.rate
        ));
    }
    line
}
