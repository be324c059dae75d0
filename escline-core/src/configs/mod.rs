//! Loading and validation of the user's `config.toml`.
//!
//! The file lives under `~/.config/escline/` and is deserialized with
//! [`serde`] via the [`toml`] crate into [`Config`], one table per concern
//! ([`Appearance`], [`Defaults`]). The parsed value sits in a process-wide
//! `OnceLock` so every module reads the same config.

pub mod errors;
mod appearance;
mod defaults;
pub use appearance::*;
pub use defaults::*;

use crate::{
    configs::errors::{ConfigError, TomlError},
    create_recursive,
};
use serde::Deserialize;
use std::{io::Read, ops::Range, path::PathBuf, sync::OnceLock};

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Represents the entire `config.toml` configuration file.
///
/// See [`Appearance`] and [`Defaults`]
#[derive(Default, Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub defaults: Defaults,
}

impl Config {
    fn apply_overrides(&mut self, overrides: ConfigOverride) {
        if let Some(prompt) = overrides.prompt {
            self.appearance.prompt = prompt;
        }
        if let Some(dir) = overrides.out_dir {
            self.defaults.out_dir = dir;
        }
    }
}

/// Reads the user's `config.toml` (falling back to [`Config::default()`]
/// when there is none), applies the CLI overrides on top, and stores the
/// result in the global `static CONFIG` for the rest of the program.
///
/// Fields the user leaves out of the file keep their default values; the
/// serde defaults on each table handle the fill-in.
///
/// # Errors
/// Errors if the config file cannot be read or parsed, or if the config was
/// already initialized.
pub fn initialize_config(overrides: ConfigOverride) -> miette::Result<(), ConfigError> {
    let mut config: Config = if let Ok(config_file) = get_config_file() {
        let mut file = std::fs::File::open(config_file).expect("File should exist");
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        toml::from_str(&contents).map_err(|e| {
            TomlError::new(
                e.span().unwrap_or(Range { start: 0, end: 0 }),
                contents,
                e.message().to_string(),
            )
        })?
    } else {
        Config::default()
    };

    config.apply_overrides(overrides);

    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(())
}

/// Returns a reference to the global [`Config`] stored by
/// [`initialize_config()`] at startup.
///
/// # Panics
/// Panics if [`initialize_config()`] has not run yet.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Values from the CLI that take precedence over the config file.
#[derive(Debug)]
pub struct ConfigOverride {
    pub prompt: Option<String>,
    pub out_dir: Option<PathBuf>,
}

fn get_conf_dir() -> std::path::PathBuf {
    let mut dir = std::env::home_dir().expect("Failed to get home directory");
    // push() one component at a time so the separators come out right on
    // every platform.
    dir.push(".config");
    dir.push("escline");
    create_recursive!(dir.as_path());
    dir
}

fn get_config_file() -> miette::Result<std::path::PathBuf, ConfigError> {
    let conf_file = get_conf_dir().join("config.toml");
    if conf_file.is_file() {
        Ok(conf_file)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No config.toml in the escline config directory.",
        )
        .into())
    }
}

#[test]
fn parse_test_config() {
    let file: Config = toml::from_str(
        r#"
            [appearance]
            prompt = ">>> "
        "#,
    )
    .expect("Parses");
    assert_eq!(file.appearance.prompt, ">>> ");
    assert_eq!(file.appearance.divider, '~');
    assert_eq!(file.defaults.out_dir, PathBuf::from("./"));
}

#[test]
fn reject_unprintable_divider() {
    let file = toml::from_str::<Config>(
        r#"
            [appearance]
            divider = " "
        "#,
    );
    assert!(file.is_err());
}
