use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External SQL engine binary. Resolved through PATH.
pub const SQLITE_BIN: &str = "sqlite3";

/// Where WhatsApp Desktop keeps its chat history, relative to the home
/// directory.
const DEFAULT_DB_RELATIVE: &str =
    "Library/Group Containers/group.net.whatsapp.WhatsApp.shared/ChatStorage.sqlite";

/// Environment override for the database path, mostly for testing against
/// a copied database.
const DB_PATH_ENV: &str = "ZAPLIST_DB";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Overrides the default ChatStorage.sqlite location. `~/` is expanded.
    pub db_path: Option<String>,
    /// ISO 3166-1 alpha-2 country used as the phone-parsing hint.
    pub default_country: Option<String>,
    /// Widen the chat query to group sessions as well.
    pub include_groups: bool,
}

impl Config {
    /// Load the config file if one exists, otherwise defaults. A broken
    /// config file is logged and ignored rather than aborting startup.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    tracing::debug!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    fn config_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("com.br", "zesmoi", "zaplist")?;
        Some(dirs.config_dir().join("config.json"))
    }

    /// The database path to read, in precedence order: environment
    /// override, config file, fixed default under the home directory.
    pub fn resolved_db_path(&self) -> PathBuf {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            return expand_tilde(&path);
        }
        if let Some(ref path) = self.db_path {
            return expand_tilde(path);
        }
        default_db_path()
    }
}

fn default_db_path() -> PathBuf {
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(DEFAULT_DB_RELATIVE),
        None => PathBuf::from(DEFAULT_DB_RELATIVE),
    }
}

/// Expand a leading `~/` to the home directory. Anything else passes
/// through untouched.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
