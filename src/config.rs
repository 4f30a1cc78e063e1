// Configuration: where the remote API lives. The base URL can come from
// the `--api-url` flag (which `clap` also fills from `MODERN_SCRAPER_API_URL`),
// from `~/.modern-scraper.json`, or fall back to the public endpoint.

use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.modern-scraper.com";
pub const API_URL_ENV: &str = "MODERN_SCRAPER_API_URL";
const CONFIG_FILE_NAME: &str = ".modern-scraper.json";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
}

/// Shape of the optional JSON config file. Unknown keys are ignored so the
/// file can be shared with other tools.
#[derive(Deserialize, Debug, Default)]
struct FileConfig {
    api_url: Option<String>,
}

impl Settings {
    /// Resolve settings. `api_url` is the value from the command line or
    /// environment; it wins over the config file at `config_path`.
    pub fn resolve(api_url: Option<String>, config_path: Option<&Path>) -> Result<Self> {
        let from_flag = api_url.filter(|s| !s.trim().is_empty());
        let url = match from_flag {
            Some(url) => url,
            None => match config_path {
                Some(path) => load_file(path)?
                    .api_url
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_API_URL.into()),
                None => DEFAULT_API_URL.into(),
            },
        };
        Ok(Settings {
            api_url: url.trim().trim_end_matches('/').to_string(),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

/// Location of the per-user config file in the home directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Read the config file. A missing file is the same as an empty one.
fn load_file(path: &Path) -> Result<FileConfig> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => {
            return Err(ScraperError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };
    log::debug!("loaded config from {}", path.display());
    serde_json::from_str(&data).map_err(|e| ScraperError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
