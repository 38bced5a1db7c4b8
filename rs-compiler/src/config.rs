use std::fs;
use std::path::{Path, PathBuf};

use rs_emit::{DEFAULT_MASS, EmitError, OutputLayout, Templates};
use rs_utils::{
    DEFAULT_APPEARANCE_DIR, DEFAULT_BEHAVIOR_DIR, DEFAULT_GEOMETRY_DIR, DEFAULT_SCRIPT_DIR,
    DEFAULT_SOURCE_DIR,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Looked up at the project root when no `--config` is given.
pub const CONFIG_FILE: &str = "prefabs.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("default_mass must be a finite, non-negative number, got {0}")]
    InvalidMass(f64),
}

/// Project settings. Every directory is relative to the project root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source_dir: PathBuf,
    pub behavior_dir: PathBuf,
    pub appearance_dir: PathBuf,
    pub geometry_dir: PathBuf,
    pub script_dir: PathBuf,
    pub default_mass: f64,
    pub keep_sources: bool,
    pub templates: TemplatePaths,
}

/// Replacement template files. Unset entries use the built-in templates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatePaths {
    pub behavior: Option<PathBuf>,
    pub appearance: Option<PathBuf>,
    pub geometry: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            behavior_dir: PathBuf::from(DEFAULT_BEHAVIOR_DIR),
            appearance_dir: PathBuf::from(DEFAULT_APPEARANCE_DIR),
            geometry_dir: PathBuf::from(DEFAULT_GEOMETRY_DIR),
            script_dir: PathBuf::from(DEFAULT_SCRIPT_DIR),
            default_mass: DEFAULT_MASS,
            keep_sources: false,
            templates: TemplatePaths::default(),
        }
    }
}

impl Config {
    pub fn parse(path: &Path, raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        if !config.default_mass.is_finite() || config.default_mass < 0.0 {
            return Err(ConfigError::InvalidMass(config.default_mass));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &raw)
    }

    /// Loads `explicit` if given. Otherwise `prefabs.toml` under `root`, falling
    /// back to defaults when that file does not exist.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            debug!("using config {:?}", path);
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout {
            behavior_dir: self.behavior_dir.clone(),
            appearance_dir: self.appearance_dir.clone(),
            geometry_dir: self.geometry_dir.clone(),
            script_dir: self.script_dir.clone(),
        }
    }

    /// Template override paths are relative to `root`.
    pub fn templates(&self, root: &Path) -> Result<Templates, EmitError> {
        let behavior = self.templates.behavior.as_ref().map(|p| root.join(p));
        let appearance = self.templates.appearance.as_ref().map(|p| root.join(p));
        let geometry = self.templates.geometry.as_ref().map(|p| root.join(p));
        Templates::with_overrides(
            behavior.as_deref(),
            appearance.as_deref(),
            geometry.as_deref(),
        )
    }
}
