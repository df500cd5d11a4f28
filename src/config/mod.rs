use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use derive_builder::Builder;
use directories::UserDirs;
use serde::{Deserialize, Serialize};

use crate::prompts::AnswerSet;

/// One entry of the plugin catalog offered during installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    pub slug: String,
    pub enabled: bool,
}

/// Answers worth reusing across projects, persisted as JSON.
///
/// Missing keys fall back to their defaults so older files keep loading
/// as the set of saved settings grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredPreferences {
    pub db_user: String,
    pub db_pass: String,
    pub db_host: String,
    pub admin_user: String,
    pub admin_password: String,
    pub admin_email: String,
    pub recommended_plugins: Vec<Plugin>,
}

impl Default for StoredPreferences {
    fn default() -> Self {
        let plugin = |name: &str, slug: &str, enabled| Plugin {
            name: name.to_owned(),
            slug: slug.to_owned(),
            enabled,
        };

        StoredPreferences {
            db_user: String::new(),
            db_pass: String::new(),
            db_host: String::new(),
            admin_user: String::new(),
            admin_password: String::new(),
            admin_email: String::new(),
            recommended_plugins: vec![
                plugin("Yoast SEO", "wordpress-seo", true),
                plugin("Jetpack", "jetpack", false),
                plugin("WooCommerce", "woocommerce", false),
            ],
        }
    }
}

impl StoredPreferences {
    /// Copy of `self` with the credentials and plugin selection taken from
    /// this session's answers. The catalog keeps its entries and order, only
    /// the `enabled` flags change.
    #[must_use]
    pub fn with_answers(&self, answers: &AnswerSet) -> StoredPreferences {
        StoredPreferences {
            db_user: answers.db_user.clone(),
            db_pass: answers.db_pass.clone(),
            db_host: answers.db_host.clone(),
            admin_user: answers.admin_user.clone(),
            admin_password: answers.admin_password.clone(),
            admin_email: answers.admin_email.clone(),
            recommended_plugins: self
                .recommended_plugins
                .iter()
                .map(|plugin| Plugin {
                    name: plugin.name.clone(),
                    slug: plugin.slug.clone(),
                    enabled: answers.plugins.iter().any(|name| name == &plugin.name),
                })
                .collect(),
        }
    }
}

/// Location of the preferences file under the user's home directory.
#[derive(Debug, Clone, Builder)]
pub struct PreferencesStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl PreferencesStore {
    #[must_use]
    pub fn builder() -> PreferencesStoreBuilder {
        PreferencesStoreBuilder::create_empty()
    }

    /// Store at `~/.wpstarter/config.json`.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a path for the user's home can not
    /// be found
    pub fn default_paths() -> Result<PreferencesStore> {
        let dirs = UserDirs::new().context("Failed to get user's home directory")?;
        let config_dir = dirs.home_dir().join(".wpstarter");
        let config_file = config_dir.join("config.json");

        Ok(PreferencesStore {
            config_dir,
            config_file,
        })
    }

    #[must_use]
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Reads stored preferences, or the defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// This function will return an error if an existing preferences file
    /// can not be read or does not parse
    pub fn load(&self) -> Result<StoredPreferences> {
        if !self.config_file.exists() {
            return Ok(StoredPreferences::default());
        }

        let contents = fs::read_to_string(&self.config_file)
            .with_context(|| format!("Failed to read {}", self.config_file.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid preferences file {}", self.config_file.display()))
    }

    /// Writes `preferences` as pretty JSON, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// This function will return an error if the preferences directory or
    /// file can not be written
    pub fn save(&self, preferences: &StoredPreferences) -> Result<()> {
        fs::create_dir_all(&self.config_dir)
            .with_context(|| format!("Failed to create {}", self.config_dir.display()))?;

        let contents = serde_json::to_string_pretty(preferences)?;

        fs::write(&self.config_file, contents)
            .with_context(|| format!("Failed to write {}", self.config_file.display()))
    }
}
