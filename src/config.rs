use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog;

/// Which request body the deployed backend expects. Older deployments take
/// `{subject, chapter, question}`; current ones also require `class_level`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    #[default]
    ClassLevel,
    Simple,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub payload: PayloadShape,
    #[serde(default = "default_class_level")]
    pub class_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            payload: PayloadShape::default(),
            class_level: default_class_level(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_class_level() -> String {
    catalog::CLASS_LEVELS[0].to_string()
}

pub fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    let dir = home.join(".icse-tutor");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if path.exists() {
        let bytes = std::fs::read(&path)?;
        let cfg: Config = serde_json::from_slice(&bytes)?;
        return Ok(cfg);
    }

    let default = Config::default();
    let json = serde_json::to_vec_pretty(&default)?;
    std::fs::write(path, json)?;
    Ok(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.base_url, "http://localhost:8000");
        assert_eq!(back.payload, PayloadShape::ClassLevel);
        assert_eq!(back.class_level, "10");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.base_url, "http://localhost:8000");
        assert_eq!(cfg.payload, PayloadShape::ClassLevel);
    }

    #[test]
    fn test_payload_shape_parses_from_snake_case() {
        let cfg: Config = serde_json::from_str(r#"{"payload": "simple"}"#).unwrap();
        assert_eq!(cfg.payload, PayloadShape::Simple);
        let cfg: Config = serde_json::from_str(r#"{"payload": "class_level"}"#).unwrap();
        assert_eq!(cfg.payload, PayloadShape::ClassLevel);
    }
}
