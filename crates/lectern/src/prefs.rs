use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FILENAME: &str = "prefs.yaml";
const APP_DIR: &str = "lectern";

/// Preference key for the dark-mode toggle.
pub const DARK_MODE_KEY: &str = "darkMode";
/// Stored value when dark mode is on. Only this exact string enables it.
pub const DARK_MODE_ENABLED: &str = "enabled";
/// Stored value when dark mode is off.
pub const DARK_MODE_DISABLED: &str = "disabled";

/// A durable key-value preference store.
///
/// The UI toggles and the `config` subcommand both write through this trait,
/// so they stay in agreement about what is on disk.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// File-backed preferences, persisted as YAML under the user config dir.
///
/// Writes go through on every `set`. A failed write is logged and the
/// in-memory value is kept, so the running session stays consistent.
#[derive(Debug, Clone, Default)]
pub struct FilePrefs {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl FilePrefs {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load_or_default() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(err) => {
                log::warn!("preferences unavailable: {err}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let values = std::fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_yaml::from_str(&contents).ok())
            .unwrap_or_default();
        Self {
            path: Some(path.to_path_buf()),
            values,
        }
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            anyhow::bail!("no preference file path");
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(&self.values)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

impl PrefStore for FilePrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(err) = self.save() {
            log::warn!("failed to persist preference {key}: {err}");
        }
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryPrefs(BTreeMap<String, String>);

#[cfg(test)]
impl PrefStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_writes_through_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");

        let mut prefs = FilePrefs::load_from(&path);
        prefs.set(DARK_MODE_KEY, DARK_MODE_ENABLED);

        let reloaded = FilePrefs::load_from(&path);
        assert_eq!(
            reloaded.get(DARK_MODE_KEY).as_deref(),
            Some(DARK_MODE_ENABLED)
        );
    }

    #[test]
    fn missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePrefs::load_from(&dir.path().join("absent.yaml"));
        assert_eq!(prefs.get(DARK_MODE_KEY), None);
    }

    #[test]
    fn corrupt_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, ": not yaml : [").unwrap();
        let prefs = FilePrefs::load_from(&path);
        assert_eq!(prefs.get(DARK_MODE_KEY), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        let mut prefs = FilePrefs::load_from(&path);
        prefs.set(DARK_MODE_KEY, DARK_MODE_ENABLED);
        prefs.set(DARK_MODE_KEY, DARK_MODE_DISABLED);
        assert_eq!(
            FilePrefs::load_from(&path).get(DARK_MODE_KEY).as_deref(),
            Some(DARK_MODE_DISABLED)
        );
    }
}
