use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::core::settings::ImageFormat;

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub variants: Vec<VariantSpec>,
    pub angles: Vec<String>,
    pub out_dir: PathBuf,
    #[serde(default)]
    pub format: ImageFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantSpec {
    pub slug: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub wheels: Option<String>,
}

fn default_color() -> String {
    "#ffffff".to_owned()
}

impl VariantSpec {
    /// The wheel selection to apply, an empty string means none.
    pub fn wheel_selection(&self) -> Option<&str> {
        self.wheels.as_deref().filter(|wheels| !wheels.is_empty())
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json_file = std::fs::File::open(path)
            .context(format!("can't open config '{}'", path.display()))?;
        let json_reader = std::io::BufReader::new(json_file);
        let config = serde_json::from_reader(json_reader)
            .context(format!("can't parse config '{}'", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_unknown_keys() {
        let config: RenderConfig = serde_json::from_value(serde_json::json!({
            "variants": [
                { "slug": "base" },
                { "slug": "red", "color": "#ff0000", "wheels": "SPORT", "note": "ignored" },
                { "slug": "plain", "wheels": "" },
            ],
            "angles": ["front", "side"],
            "out_dir": "/out",
            "comment": "ignored",
        }))
        .unwrap();

        assert_eq!(config.format, ImageFormat::Png);
        assert_eq!(config.variants[0].color, "#ffffff");
        assert_eq!(config.variants[0].wheel_selection(), None);
        assert_eq!(config.variants[1].wheel_selection(), Some("SPORT"));
        assert_eq!(config.variants[2].wheel_selection(), None);
        assert_eq!(config.out_dir, PathBuf::from("/out"));
    }

    #[test]
    fn format_is_configurable() {
        let config: RenderConfig = serde_json::from_value(serde_json::json!({
            "variants": [], "angles": [], "out_dir": "out", "format": "exr",
        }))
        .unwrap();
        assert_eq!(config.format, ImageFormat::OpenExr);
    }

    #[test]
    fn missing_and_malformed_files_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RenderConfig::load(dir.path().join("none.json")).is_err());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ \"variants\": [").unwrap();
        assert!(RenderConfig::load(&path).is_err());

        std::fs::write(&path, "{ \"angles\": [] }").unwrap();
        assert!(RenderConfig::load(&path).is_err());
    }
}
