//! User preferences read from an external key/value store (cookies or local
//! storage in a browser host, a TOML file elsewhere).

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::settings::SuggestionSettings;

pub const KEY_DEFAULT_LANG: &str = "default_lang";
pub const KEY_PAGE_LANG: &str = "page_lang";
pub const KEY_SEARCH_TYPE: &str = "search_type";

/// Scalar key/value persistence. The assistance layer only ever reads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Flat TOML file of string values.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open from file, starting empty if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, PreferenceError> {
        let values = match fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| PreferenceError::Parse(e.to_string()))?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self) -> Result<(), PreferenceError> {
        let content =
            toml::to_string(&self.values).map_err(|e| PreferenceError::Parse(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Preferences consumed by the assistance layer, read once at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Language sent with suggestion queries.
    pub default_lang: String,
    /// UI language, passed through to the renderer.
    pub page_lang: Option<String>,
    pub search_type: u8,
}

impl Preferences {
    pub fn load(store: &dyn PreferenceStore, defaults: &SuggestionSettings) -> Self {
        let default_lang = store
            .get(KEY_DEFAULT_LANG)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| defaults.default_lang.clone());
        let search_type = match store.get(KEY_SEARCH_TYPE) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "ignoring malformed search_type preference");
                defaults.default_search_type
            }),
            None => defaults.default_search_type,
        };
        Self {
            default_lang,
            page_lang: store.get(KEY_PAGE_LANG),
            search_type,
        }
    }
}
