//! Configuration file handling for zenwealth.
//!
//! The configuration file is stored at `$ZENWEALTH_HOME/config.json` and contains settings for
//! backups, imports and the location of the record store.

use crate::backup::Backup;
use crate::import::ImportMode;
use crate::repo::Repository;
use crate::store::FileStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "zenwealth";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const STORE: &str = "store";
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$ZENWEALTH_HOME` and from there it loads `$ZENWEALTH_HOME/config.json`. It provides
/// paths to other items that are either configurable or are expected in a certain location within
/// the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    store_dir: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory, its subdirectories and an initial `config.json` file with
    /// default settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/zenwealth`
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists there.
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the zenwealth home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups)?;

        let config_file = ConfigFile::default();
        let store_dir = resolve(&root, config_file.store_path());
        utils::make_dir(&store_dir)?;
        config_file.save(&config_path)?;

        Ok(Self {
            root,
            backups,
            store_dir,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the home directory exists and that the config file exists
    /// - load the config file
    /// - validate that the backups and store directories exist
    /// - return the loaded configuration object
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .context("The zenwealth home directory is missing. Run 'zenwealth init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}'. Run 'zenwealth init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;

        let config = Self {
            root: root.clone(),
            backups: root.join(BACKUPS),
            store_dir: resolve(&root, config_file.store_path()),
            config_path,
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        if !config.store_dir.is_dir() {
            bail!(
                "The record store directory is missing '{}'",
                config.store_dir.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    pub fn import_mode(&self) -> ImportMode {
        self.config_file.import_mode
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }

    /// Opens the record store and loads the transactions from it.
    pub fn repository(&self) -> Result<Repository<FileStore>> {
        let store = FileStore::open(&self.store_dir)?;
        Ok(Repository::load(store))
    }
}

/// Returns `p` if it is absolute, otherwise `root` joined with `p`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "zenwealth",
///   "config_version": 1,
///   "backup_copies": 5,
///   "import_mode": "strict",
///   "store_path": "store"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "zenwealth"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of backup copies to keep per kind of backup
    backup_copies: u32,

    /// How records in an import file are validated
    #[serde(default)]
    import_mode: ImportMode,

    /// Path to the record store directory (optional, relative to the home directory or absolute)
    /// Defaults to $ZENWEALTH_HOME/store if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    store_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            import_mode: ImportMode::default(),
            store_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or is not a zenwealth config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config version {} is unsupported. Is a newer version of zenwealth available?",
            config.config_version
        );
        anyhow::ensure!(
            config.backup_copies > 0,
            "backup_copies in the config file must be at least 1, got 0"
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }

    /// Gets the store path.
    ///
    /// If the path is relative, it should be interpreted as relative to the home directory.
    /// If None, defaults to $ZENWEALTH_HOME/store
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(STORE))
    }
}
