//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::{RankingStrategy, RespondentRole};
use crate::llm::prompts::DEFAULT_SYSTEM_PROMPT;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Generation backend settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Testimonial defaults
    #[serde(default)]
    pub testimonial: TestimonialSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (ollama)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// Base URL of the generation server
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Model for per-question summaries and the final report
    #[serde(default = "default_summary_model")]
    pub summary_model: String,

    /// Model for testimonials
    #[serde(default = "default_testimonial_model")]
    pub testimonial_model: String,

    /// System instruction sent with every request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestimonialSettings {
    /// How the respondent is described (subscriber, reader, user)
    #[serde(default)]
    pub role: RespondentRole,

    /// Which top-score respondent to quote (length, recent)
    #[serde(default)]
    pub ranking: RankingStrategy,
}

// Default value functions

fn default_llm_provider() -> String {
    "ollama".to_string()
}

fn default_llm_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_summary_model() -> String {
    "llama2".to_string()
}

fn default_testimonial_model() -> String {
    "mistral".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            endpoint: default_llm_endpoint(),
            summary_model: default_summary_model(),
            testimonial_model: default_testimonial_model(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut settings = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::info!("No config file found, using defaults");
            Self::default()
        };

        settings.apply_env_overrides(std::env::var("OLLAMA_HOST").ok().as_deref());

        Ok(settings)
    }

    /// Parse a specific settings file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply the `OLLAMA_HOST` override, as the Ollama CLI reads it.
    fn apply_env_overrides(&mut self, ollama_host: Option<&str>) {
        if let Some(host) = ollama_host.map(str::trim).filter(|h| !h.is_empty()) {
            self.llm.endpoint = if host.contains("://") {
                host.to_string()
            } else {
                format!("http://{}", host)
            };
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "survey-digest", "survey-digest")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
