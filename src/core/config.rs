//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Hazard rates are reported in failures per this many hours by default
pub const DEFAULT_HR_MULTIPLIER: f64 = 1.0e6;

/// Relk configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stress limit table to use instead of the built-in one
    pub stress_limits: Option<PathBuf>,

    /// Hazard rate multiplier (1e6 = failures per million hours)
    pub hr_multiplier: Option<f64>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/relk/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.relk/config.yaml in cwd or any ancestor)
        if let Some(project_path) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::find_project_config(&cwd))
        {
            if let Some(project) = Self::read(&project_path) {
                config.merge(project);
            }
        }

        // 4. Environment variables
        if let Ok(path) = std::env::var("RELK_STRESS_LIMITS") {
            config.stress_limits = Some(PathBuf::from(path));
        }
        if let Ok(multiplier) = std::env::var("RELK_HR_MULTIPLIER") {
            match multiplier.parse::<f64>() {
                Ok(m) => config.hr_multiplier = Some(m),
                Err(_) => tracing::warn!(value = %multiplier, "ignoring unparseable RELK_HR_MULTIPLIER"),
            }
        }
        if let Ok(format) = std::env::var("RELK_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "relk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Nearest `.relk/config.yaml` at or above `start`
    fn find_project_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(".relk").join("config.yaml"))
            .find(|candidate| candidate.exists())
    }

    fn read(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config file");
                None
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.stress_limits.is_some() {
            self.stress_limits = other.stress_limits;
        }
        if other.hr_multiplier.is_some() {
            self.hr_multiplier = other.hr_multiplier;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Effective hazard rate multiplier
    pub fn hr_multiplier(&self) -> f64 {
        self.hr_multiplier
            .filter(|m| *m > 0.0)
            .unwrap_or(DEFAULT_HR_MULTIPLIER)
    }
}
