//! Embedded assets and viewport configuration resolution.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use cozy_corner::{ConfigError, ViewportConfig};
use rust_embed::RustEmbed;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Embeds all assets from the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
/// In release mode, assets are compressed and embedded in the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Errors that can occur when loading the bundled configuration.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("{0} not found in embedded assets")]
    NotFound(&'static str),
    #[error("invalid UTF-8 in {name}: {source}")]
    InvalidUtf8 {
        name: &'static str,
        source: std::str::Utf8Error,
    },
    #[error("bundled {name} is invalid: {source}")]
    Config {
        name: &'static str,
        source: ConfigError,
    },
}

/// Where the active viewport configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    UserFile(PathBuf),
    Bundled,
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine(path) => write!(f, "{} (--config)", path.display()),
            Self::UserFile(path) => write!(f, "{}", path.display()),
            Self::Bundled => write!(f, "bundled {CONFIG_FILE_NAME}"),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Outcome of [`resolve_config`]: the config in effect plus every failure
/// hit on the way, for display as toasts.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub config: ViewportConfig,
    pub source: ConfigSource,
    pub errors: Vec<String>,
}

/// Parses the configuration embedded in the binary.
pub fn load_bundled_config() -> Result<ViewportConfig, AssetError> {
    let file = Assets::get(CONFIG_FILE_NAME).ok_or(AssetError::NotFound(CONFIG_FILE_NAME))?;
    let source = std::str::from_utf8(&file.data).map_err(|source| AssetError::InvalidUtf8 {
        name: CONFIG_FILE_NAME,
        source,
    })?;
    ViewportConfig::from_ron_str(source).map_err(|source| AssetError::Config {
        name: CONFIG_FILE_NAME,
        source,
    })
}

/// Per-user override location, e.g. `~/.config/cozy-corner/viewport.ron`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Picks the first configuration that loads cleanly, in order: the
/// `--config` path, the user config file if it exists, the bundled file,
/// and finally the compiled defaults.
pub fn resolve_config(cli_path: Option<&Path>) -> ResolvedConfig {
    resolve_from(cli_path, user_config_path().as_deref())
}

fn resolve_from(cli_path: Option<&Path>, user_path: Option<&Path>) -> ResolvedConfig {
    let mut errors = Vec::new();

    let mut try_file = |path: &Path| match ViewportConfig::load(path) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("ignoring viewport config: {err}");
            errors.push(err.to_string());
            None
        }
    };

    let found = cli_path
        .and_then(|path| try_file(path).map(|c| (c, ConfigSource::CommandLine(path.into()))))
        .or_else(|| {
            user_path
                .filter(|path| path.exists())
                .and_then(|path| try_file(path).map(|c| (c, ConfigSource::UserFile(path.into()))))
        });

    let (config, source) = match found {
        Some(found) => found,
        None => match load_bundled_config() {
            Ok(config) => (config, ConfigSource::Bundled),
            Err(err) => {
                log::warn!("{err}");
                errors.push(err.to_string());
                (ViewportConfig::default(), ConfigSource::Defaults)
            }
        },
    };

    log::info!("viewport config loaded from {source}");
    ResolvedConfig {
        config,
        source,
        errors,
    }
}
