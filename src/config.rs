use crate::i18n::Language;
use crate::theme::ThemeMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ai: AiConfig,
    #[serde(default = "default_language")]
    pub language: Language,
    #[serde(default = "default_theme")]
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub image_model: String,
}

fn default_language() -> Language {
    Language::Ar
}

fn default_theme() -> ThemeMode {
    ThemeMode::Chameleon
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".usra")
            .join("config.yaml")
    }

    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            if let Ok(config) = Self::load_from_file(&path) {
                return Ok(config);
            }
        }
        Ok(Self::default())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to_file(Self::config_path())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AiConfig {
                api_url: "https://api.openai.com/v1".to_string(),
                api_key: std::env::var("USRA_API_KEY")
                    .or_else(|_| std::env::var("OPENAI_API_KEY"))
                    .unwrap_or_default(),
                model: "gpt-4o-mini".to_string(),
                image_model: "dall-e-3".to_string(),
            },
            language: default_language(),
            theme: default_theme(),
        }
    }
}
