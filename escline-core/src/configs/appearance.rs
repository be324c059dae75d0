use serde::{Deserialize, Deserializer};

/// Represents the `[appearance]` table of the `config.toml` file.
///
/// The `[appearance]` table holds configuration values for the input region
/// escline draws at the bottom of the screen.
///
/// The default values (if no config exists):
/// ```toml
/// [appearance]
/// prompt = "> "
/// divider = "~"
/// ```
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Appearance {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_divider")]
    #[serde(deserialize_with = "printable_ascii")]
    pub divider: char,
}

fn default_prompt() -> String {
    String::from("> ")
}

const fn default_divider() -> char {
    '~'
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            divider: default_divider(),
        }
    }
}

fn printable_ascii<'de, D>(deserializer: D) -> Result<char, D::Error>
where
    D: Deserializer<'de>,
{
    let c = char::deserialize(deserializer)?;
    if !c.is_ascii_graphic() {
        return Err(serde::de::Error::custom(
            "Invalid divider, Must be a printable ascii character",
        ));
    }
    Ok(c)
}
