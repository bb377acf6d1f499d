//! Deck Configuration
//! Defaults match the published deck (Engineering vs. everyone, 2013/2018/
//! 2023); an optional `enrolldeck.json` next to the binary overrides them.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "enrolldeck.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Source CSV, loaded once at startup.
    pub csv_path: PathBuf,
    /// College every slide compares against.
    pub base_college: String,
    /// Academic years, one deck slide each, in display order.
    pub years: Vec<i32>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("CleanedCombinedSummaryUndergrad.csv"),
            base_college: "Engineering".to_string(),
            years: vec![2013, 2018, 2023],
        }
    }
}

impl DeckConfig {
    /// Read `enrolldeck.json` from the working directory. A missing file is
    /// normal; a malformed one logs a warning and falls back to defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(config) => {
                log::info!("loaded deck configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "ignoring malformed {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_three_deck_years() {
        let config = DeckConfig::default();
        assert_eq!(config.base_college, "Engineering");
        assert_eq!(config.years, [2013, 2018, 2023]);
    }

    #[test]
    fn partial_json_overrides_keep_remaining_defaults() {
        let config: DeckConfig =
            serde_json::from_str(r#"{ "base_college": "Business" }"#).unwrap();
        assert_eq!(config.base_college, "Business");
        assert_eq!(config.years, [2013, 2018, 2023]);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = DeckConfig::load_from(Path::new("no/such/enrolldeck.json"));
        assert_eq!(config.base_college, "Engineering");
    }
}
