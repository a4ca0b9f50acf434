// Runtime settings and the per-project `rise.json` file.
//
// `Settings` is built once in `main` from the command line (with env var
// fallbacks handled by clap) and handed to every command.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::ApiClient;
use crate::credentials::{CredentialStore, Credentials};

pub const DEFAULT_HOST: &str = "https://api.rise.sh";
pub const PROJECT_CONFIG_FILE: &str = "rise.json";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the rise API.
    pub host: String,
    /// Where credentials are kept.
    pub config_dir: PathBuf,
    /// Directory holding `rise.json`, normally the working directory.
    pub project_dir: PathBuf,
}

impl Settings {
    /// `~/.rise`, or `./.rise` when no home directory can be found.
    pub fn default_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rise")
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(&self.config_dir)
    }

    pub fn api(&self) -> Result<ApiClient> {
        ApiClient::new(&self.host)
    }

    /// Stored credentials, or an error telling the user to log in.
    pub fn require_credentials(&self) -> Result<Credentials> {
        match self.credential_store().load()? {
            Some(creds) => Ok(creds),
            None => bail!("You are not logged in. Run `rise login` first."),
        }
    }

    /// API client authenticated with the stored token.
    pub fn authed_api(&self) -> Result<ApiClient> {
        let creds = self.require_credentials()?;
        Ok(self.api()?.with_token(&creds.access_token))
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.project_dir.join(PROJECT_CONFIG_FILE)
    }
}

/// Contents of `rise.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    /// Directory to publish, relative to the one holding `rise.json`.
    pub path: String,
}

impl ProjectConfig {
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(PROJECT_CONFIG_FILE);
        if !path.exists() {
            bail!(
                "{} not found in {}. Run `rise init` first.",
                PROJECT_CONFIG_FILE,
                project_dir.display()
            );
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let path = project_dir.join(PROJECT_CONFIG_FILE);
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&path, data + "\n").with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn publish_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.path)
    }
}
