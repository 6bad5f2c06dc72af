//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sbtree/sbtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `SBTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{Node, TreeConfig, TreeKind};

/// Prefix of the environment overrides, e.g. `SBTREE_TREE=farey`.
pub const ENV_PREFIX: &str = "SBTREE";

/// Tree tag selecting the `left`/`right` bounds.
pub const CUSTOM_TREE: &str = "custom";

/// Unified configuration for sbtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree configuration tag: stern-brocot, farey, octave-reduced or custom
    pub tree: String,
    /// Left bound when `tree = "custom"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Node>,
    /// Right bound when `tree = "custom"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Node>,
    /// Share one node cache between all searches
    pub cache: bool,
    /// Abort searches after this many mediant steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
    /// Quotients consumed by `walk` unless given on the command line
    pub walk_limit: usize,
    /// Probe count for `neighbors`; derived from the numerator when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_range: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree: TreeKind::SternBrocot.to_string(),
            left: None,
            right: None,
            cache: true,
            max_steps: None,
            walk_limit: 32,
            search_range: None,
        }
    }
}

/// Get the XDG config directory for sbtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sbtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sbtree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// `explicit` must exist when given; the global file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::from_sources(
            global_config_path(),
            explicit,
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    /// Load from the given layers on top of the compiled defaults.
    pub fn from_sources(
        global: Option<PathBuf>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("tree", defaults.tree.clone())
            .map_err(config_err)?
            .set_default("cache", defaults.cache)
            .map_err(config_err)?
            .set_default("walk_limit", defaults.walk_limit as i64)
            .map_err(config_err)?;

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!(path = %global_path.display(), "global config");
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!(path = %path.display(), "explicit config");
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder.add_source(env).build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.tree_config()?;
        Ok(settings)
    }

    /// Resolve the configured tree.
    ///
    /// `custom` requires both bounds; every other tag ignores them.
    pub fn tree_config(&self) -> Result<TreeConfig, ApplicationError> {
        if self.tree.trim().eq_ignore_ascii_case(CUSTOM_TREE) {
            return match (&self.left, &self.right) {
                (Some(left), Some(right)) => {
                    Ok(TreeKind::Custom(left.clone(), right.clone()).resolve()?)
                }
                _ => Err(ApplicationError::Config {
                    message: "custom tree needs both `left` and `right`".to_string(),
                }),
            };
        }
        let kind: TreeKind = self.tree.parse()?;
        Ok(kind.resolve()?)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# sbtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/sbtree/sbtree.toml
#   Explicit: sbtree --config <file>
#   Env:      SBTREE_* environment variables (e.g. SBTREE_TREE=farey)

# Tree to navigate: stern-brocot (0/1..1/0), farey (0/1..1/1),
# octave-reduced (1/1..2/1) or custom
# tree = "stern-brocot"

# Bounds for tree = "custom"; must be Farey neighbors for a proper tree
# left = "1/3"
# right = "1/2"

# Canonicalize nodes through a shared cache
# cache = true

# Abort a search after this many mediant steps (unset: unbounded)
# max_steps = 10000

# Continued-fraction quotients consumed by `walk`
# walk_limit = 32

# Probe count for `neighbors` (unset: 10^(digits of numerator + 1))
# search_range = 1000
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
