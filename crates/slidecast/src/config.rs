use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "slidecast";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

/// The deck generation service endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Narration voice passed with every generation request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `slidecast config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents =
            format!("# Slidecast configuration — https://github.com/mklab-se/slidecast\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.cadence_ms" => {
                let cadence = match value.parse::<u64>() {
                    Ok(ms) if ms > 0 => ms,
                    _ => anyhow::bail!(
                        "Invalid cadence: {value}. Must be a positive number of milliseconds."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .cadence_ms = Some(cadence);
            }
            "defaults.autoplay" => {
                let on = parse_bool(value).ok_or_else(|| {
                    anyhow::anyhow!("Invalid autoplay: {value}. Must be 'true' or 'false'.")
                })?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .autoplay = Some(on);
            }
            "defaults.windowed" => {
                let on = parse_bool(value).ok_or_else(|| {
                    anyhow::anyhow!("Invalid windowed: {value}. Must be 'true' or 'false'.")
                })?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(on);
            }
            "service.url" => {
                if value.is_empty() {
                    anyhow::bail!("Invalid url: must not be empty.");
                }
                self.service.get_or_insert_with(ServiceConfig::default).url =
                    Some(value.to_string());
            }
            "service.voice" => {
                if value.is_empty() {
                    anyhow::bail!("Invalid voice: must not be empty.");
                }
                self.service
                    .get_or_insert_with(ServiceConfig::default)
                    .voice = Some(value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.cadence_ms, defaults.autoplay, defaults.windowed, service.url, service.voice"
            ),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_theme() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        assert_eq!(
            config.defaults.as_ref().and_then(|d| d.theme.as_deref()),
            Some("dark")
        );
        assert!(config.set("defaults.theme", "sepia").is_err());
    }

    #[test]
    fn test_set_cadence_requires_positive_number() {
        let mut config = Config::default();
        config.set("defaults.cadence_ms", "2500").unwrap();
        assert_eq!(
            config.defaults.as_ref().and_then(|d| d.cadence_ms),
            Some(2500)
        );
        assert!(config.set("defaults.cadence_ms", "0").is_err());
        assert!(config.set("defaults.cadence_ms", "soon").is_err());
    }

    #[test]
    fn test_set_bools() {
        let mut config = Config::default();
        config.set("defaults.autoplay", "true").unwrap();
        config.set("defaults.windowed", "false").unwrap();
        let defaults = config.defaults.as_ref().unwrap();
        assert_eq!(defaults.autoplay, Some(true));
        assert_eq!(defaults.windowed, Some(false));
        assert!(config.set("defaults.autoplay", "yes").is_err());
    }

    #[test]
    fn test_set_service_fields() {
        let mut config = Config::default();
        config.set("service.url", "http://localhost:8787/generate").unwrap();
        config.set("service.voice", "en-US-Standard-C").unwrap();
        let service = config.service.as_ref().unwrap();
        assert_eq!(service.url.as_deref(), Some("http://localhost:8787/generate"));
        assert_eq!(service.voice.as_deref(), Some("en-US-Standard-C"));
        assert!(config.set("service.url", "").is_err());
    }

    #[test]
    fn test_unknown_key_lists_valid_ones() {
        let mut config = Config::default();
        let err = config.set("defaults.volume", "11").unwrap_err();
        assert!(err.to_string().contains("defaults.cadence_ms"));
    }

    #[test]
    fn test_roundtrip_yaml() {
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("service.url", "http://localhost:8787/generate").unwrap();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed.defaults.and_then(|d| d.theme),
            Some("light".to_string())
        );
        assert_eq!(
            parsed.service.and_then(|s| s.url),
            Some("http://localhost:8787/generate".to_string())
        );
    }
}
