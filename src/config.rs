use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use getset::{CopyGetters, Getters};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};

use crate::service::HttpSession;
use crate::Result;

static APP_DIR_NAME: &str = "ojfetch";
static CONFIG_FILE_NAME: &str = "config.yaml";
static COOKIES_FILE_NAME: &str = "cookies.json";

static USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "-",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

#[derive(Serialize, Deserialize, Getters, Default, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Config {
    #[get = "pub"]
    session: SessionConfig,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the config file at the default path, or the default config if there is none.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file : {}", path.display()))?;
        serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file : {}", path.display()))
    }

    pub fn build_session(&self) -> Result<HttpSession> {
        let client = self.session.client_builder().build().context(
            "Could not setup client. \
             TLS backend cannot be initialized, or the resolver cannot load the system configuration.",
        )?;
        Ok(HttpSession::new(
            client,
            &self.session.cookies_path,
            self.session.max_redirects,
        ))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let yaml = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&yaml)
    }
}

#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(with = "humantime_serde")]
    #[get_copy = "pub"]
    timeout: Duration,
    #[get_copy = "pub"]
    max_redirects: usize,
    #[get = "pub"]
    cookies_path: PathBuf,
}

impl SessionConfig {
    fn client_builder(&self) -> ClientBuilder {
        Client::builder()
            .referer(false)
            .redirect(Policy::none()) // redirects are followed by HttpSession
            .user_agent(USER_AGENT)
            .timeout(Some(self.timeout))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            cookies_path: data_dir.join(APP_DIR_NAME).join(COOKIES_FILE_NAME),
        }
    }
}
