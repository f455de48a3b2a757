use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use directories_next::ProjectDirs;
use serde::Deserialize;

/// Shortest id length accepted from the config file.
pub const MIN_ID_LENGTH: usize = 4;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind: IpAddr,
    pub port: u16,
    pub pastes: Pastes,
    pub sweep: Sweep,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Pastes {
    pub id_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Sweep {
    /// Seconds between expiry sweeps, zero disables the sweeper.
    pub interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            pastes: Pastes::default(),
            sweep: Sweep::default(),
        }
    }
}

impl Default for Pastes {
    fn default() -> Self {
        Pastes { id_length: 8 }
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Sweep { interval_secs: 300 }
    }
}

impl Config {
    /// Load the config from an explicit file, or from the default location if one exists there.
    ///
    /// Falls back to defaults when no file is given and none is found.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Config::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.pastes.id_length < MIN_ID_LENGTH {
            bail!(
                "pastes.id_length must be at least {MIN_ID_LENGTH}, got {}",
                self.pastes.id_length
            );
        }
        Ok(())
    }
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "quickpaste").map(|dirs| dirs.config_dir().join("config.toml"))
}
