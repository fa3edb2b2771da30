use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File};
use thiserror::Error;

use super::schema::Settings;

/// Points at a config file outside the XDG location.
const CONFIG_PATH_VAR: &str = "TONEARM_CONFIG_PATH";
/// Overrides take the form `TONEARM__SECTION__KEY`.
const ENV_PREFIX: &str = "TONEARM";

/// A setting that parsed but cannot be used.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidSetting {
    #[error("audio.tick_ms must be at least 1")]
    TickMs,

    #[error("playback.volume must be within [0, 1], got {0}")]
    Volume(f32),

    #[error("controls.volume_step must be within (0, 1], got {0}")]
    VolumeStep(f32),
}

impl Settings {
    /// Read the user's config file, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Like [`Settings::load`] with an explicit file. A missing file only
    /// means defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), InvalidSetting> {
        if self.audio.tick_ms == 0 {
            return Err(InvalidSetting::TickMs);
        }

        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(InvalidSetting::Volume(volume));
        }

        let step = self.controls.volume_step;
        if !(step > 0.0 && step <= 1.0) {
            return Err(InvalidSetting::VolumeStep(step));
        }
        Ok(())
    }

    /// Where the log file goes: `log.file`, else `tonearm.log` in the temp dir.
    pub fn log_file(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("tonearm.log"))
    }
}

/// `TONEARM_CONFIG_PATH` if set, else the XDG location.
pub fn resolve_config_path() -> Option<PathBuf> {
    non_empty_var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/tonearm/config.toml`, falling back to
/// `~/.config/tonearm/config.toml`. An empty variable counts as unset.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = non_empty_var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty_var("HOME").map(|home| PathBuf::from(home).join(".config")))?;

    Some(config_home.join("tonearm").join("config.toml"))
}

fn non_empty_var(key: &str) -> Option<OsString> {
    env::var_os(key).filter(|v| !v.is_empty())
}
