use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Represents the `[defaults]` table of the `config.toml` file.
///
/// The `[defaults]` table holds configuration values for how escline
/// should behave. Currently the user may only specify a default `out-dir`,
/// where transcript files will be created when running `escline -f path/to/file`.
///
/// The default values (if no config exists) is the current directory:
/// ```toml
/// [defaults]
/// out-dir = "./"
/// ```
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Defaults {
    #[serde(rename = "out-dir")]
    #[serde(default = "default_out_dir")]
    #[serde(deserialize_with = "validate_dir")]
    pub out_dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("./"),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("./")
}

fn validate_dir<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    let p = PathBuf::deserialize(deserializer)?;
    if !p.exists() || !p.is_dir() {
        return Err(serde::de::Error::custom(
            "Error setting out-dir, Either does not exist or is not a directory",
        ));
    }
    Ok(p)
}
