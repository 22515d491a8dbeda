use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Calibration parameters shared by the capture and automation sides.
/// Only `screen_scaling` and the pacing delays matter to click planning;
/// the rest is consumed by the vision collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Background color of the minefield frame, used to locate it on
    /// screen.
    pub main_color: [u8; 3],
    /// Display scaling between screenshot pixels and mouse coordinates.
    pub screen_scaling: f32,
    /// Extra pixels added to the detected tile size.
    pub tile_padding: u32,
    /// Pixels trimmed from the detected field border.
    pub field_padding: u32,
    /// Delay between observe cycles.
    pub check_delay_ms: u64,
    /// Delay between two planned clicks.
    pub click_delay_ms: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            main_color: [198, 198, 198],
            screen_scaling: 1.0,
            tile_padding: 5,
            field_padding: 12,
            check_delay_ms: 2000,
            click_delay_ms: 1000,
        }
    }
}

pub fn load(path: &Path) -> anyhow::Result<BotConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_calibration() {
        let config = BotConfig::default();

        assert_eq!(config.main_color, [198, 198, 198]);
        assert_eq!(config.screen_scaling, 1.0);
        assert_eq!(config.tile_padding, 5);
        assert_eq!(config.field_padding, 12);
    }

    #[test]
    fn toml_round_trips() {
        let config = BotConfig {
            screen_scaling: 2.0,
            click_delay_ms: 250,
            ..Default::default()
        };

        let text = toml::to_string(&config).unwrap();
        let parsed: BotConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: BotConfig = toml::from_str("screen_scaling = 1.5").unwrap();

        assert_eq!(parsed.screen_scaling, 1.5);
        assert_eq!(parsed.field_padding, 12);
    }
}
