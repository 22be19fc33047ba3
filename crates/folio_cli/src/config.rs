//! folio.toml configuration

use anyhow::{Context, Result};
use folio_core::Portfolio;
use folio_motion::{
    CarouselConfig, OrbitConfig, PageConfig, TiltConfig, TimelineConfig, TrailConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Values that parse but cannot drive the components
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("[orbit] radius must be positive, got {0}")]
    OrbitRadius(f32),

    #[error("[orbit] tick_interval_ms must be at least 1")]
    OrbitInterval,

    #[error("[{section}] {field} must be between 0 and 1, got {value}")]
    Threshold {
        section: &'static str,
        field: &'static str,
        value: f32,
    },

    #[error("[tilt] spring needs positive stiffness and mass")]
    TiltSpring,

    #[error("[trail] trail_count must be at least 1")]
    TrailCount,

    #[error("[contact] sink = \"outbox\" needs an outbox_path")]
    MissingOutbox,
}

/// Folio project configuration (folio.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub orbit: OrbitConfig,
    #[serde(default)]
    pub tilt: TiltConfig,
    #[serde(default)]
    pub trail: TrailConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content file, relative to the project directory
    #[serde(default = "default_content_path")]
    pub path: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: default_content_path(),
        }
    }
}

/// Where contact messages go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Discard,
    Outbox,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default)]
    pub sink: SinkKind,
    /// JSON-lines file for the outbox sink, relative to the project directory
    #[serde(default)]
    pub outbox_path: Option<PathBuf>,
}

fn default_content_path() -> PathBuf {
    PathBuf::from("portfolio.toml")
}

fn check_unit(section: &'static str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Threshold {
            section,
            field,
            value,
        })
    }
}

impl FolioConfig {
    /// Load configuration from a directory or a file path
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join("folio.toml")
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No folio.toml found at {}. Run `folio init` first.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: FolioConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
        Ok(config)
    }

    /// Reject values the components cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.orbit.radius <= 0.0 || !self.orbit.radius.is_finite() {
            return Err(ConfigError::OrbitRadius(self.orbit.radius));
        }
        if self.orbit.tick_interval_ms == 0 {
            return Err(ConfigError::OrbitInterval);
        }
        check_unit("orbit", "visibility_threshold", self.orbit.visibility_threshold)?;
        check_unit("carousel", "visibility_threshold", self.carousel.visibility_threshold)?;
        if !self.tilt.spring.is_valid() {
            return Err(ConfigError::TiltSpring);
        }
        if self.trail.trail_count == 0 {
            return Err(ConfigError::TrailCount);
        }
        check_unit("timeline", "start_offset", self.timeline.start_offset)?;
        check_unit("timeline", "end_offset", self.timeline.end_offset)?;
        if self.contact.sink == SinkKind::Outbox && self.contact.outbox_path.is_none() {
            return Err(ConfigError::MissingOutbox);
        }
        Ok(())
    }

    /// Read and validate the content file named by `[content] path`
    pub fn load_content(&self, dir: &Path) -> Result<Portfolio> {
        let path = dir.join(&self.content.path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let portfolio: Portfolio = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        portfolio
            .validated()
            .with_context(|| format!("Invalid content in {}", path.display()))
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
