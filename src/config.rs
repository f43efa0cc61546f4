use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Error, ErrorKind, Result};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use crate::hotp::Construction;
use crate::totp::{Totp, DEFAULT_STEP};

const DIRECTORY: &str = ".otp-window";
const FILE_NAME: &str = "config.toml";

/// Runtime settings, read from TOML.
///
/// ```toml
/// step_size = 30
/// construction = "chained"   # or "rfc4226"
/// log_level = "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub step_size: NonZeroU64,
    pub construction: Construction,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            step_size: DEFAULT_STEP,
            construction: Construction::default(),
            log_level: String::from("warn"),
        }
    }
}

pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "Unable to find home directory"))?;

    Ok(home.join(DIRECTORY).join(FILE_NAME))
}

impl Settings {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(path)?;
        Settings::from_toml(&contents)
    }

    pub fn load_default() -> Result<Settings> {
        Settings::load(&default_path()?)
    }

    pub fn from_toml(contents: &str) -> Result<Settings> {
        toml::from_str(contents).map_err(|err| Error::new(ErrorKind::InvalidData, err))
    }

    pub fn totp(&self) -> Totp {
        Totp::new(self.step_size, self.construction)
    }
}
