use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use taskpad_model::PreferenceStorage;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

pub const PREFS_FILE_NAME: &str = "prefs.json";

/// `localStorage` stand-in for the terminal: a flat JSON object of string
/// values in the data directory, rewritten atomically on every change.
#[derive(Debug)]
pub struct FilePreferences {
    pub path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FilePreferences {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let path = data_dir.join(PREFS_FILE_NAME);
        let items = if path.exists() {
            load_items(&path)?
        } else {
            BTreeMap::new()
        };

        info!(
            prefs = %path.display(),
            keys = items.len(),
            "opened preference file"
        );

        Ok(Self { path, items })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        save_items_atomic(&self.path, &self.items)
            .with_context(|| format!("failed to save {}", self.path.display()))
    }
}

impl PreferenceStorage for FilePreferences {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        let previous = self.items.insert(key.to_string(), value.to_string());
        if previous.as_deref() == Some(value) {
            return;
        }

        if let Err(err) = self.save() {
            error!(error = %format!("{err:#}"), key, "failed writing preference");
        }
    }
}

#[tracing::instrument(skip(path))]
fn load_items(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    debug!(file = %path.display(), "loading preferences");
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
        Ok(items) => Ok(items),
        Err(err) => {
            // a corrupt file only loses the preference, never the session
            warn!(error = %err, file = %path.display(), "ignoring unreadable preference file");
            Ok(BTreeMap::new())
        }
    }
}

#[tracing::instrument(skip(path, items))]
fn save_items_atomic(path: &Path, items: &BTreeMap<String, String>) -> anyhow::Result<()> {
    debug!(file = %path.display(), count = items.len(), "saving preferences atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    let serialized = serde_json::to_string_pretty(items)?;
    writeln!(temp, "{serialized}")?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use taskpad_model::{PreferenceStorage, ThemeMode, load_theme_mode, save_theme_mode};
    use tempfile::tempdir;

    use super::{FilePreferences, PREFS_FILE_NAME};

    #[test]
    fn theme_survives_reopen() {
        let temp = tempdir().expect("tempdir");
        {
            let mut prefs = FilePreferences::open(temp.path()).expect("open prefs");
            save_theme_mode(&mut prefs, ThemeMode::Dark);
        }

        let prefs = FilePreferences::open(temp.path()).expect("reopen prefs");
        assert_eq!(load_theme_mode(&prefs, false), ThemeMode::Dark);
    }

    #[test]
    fn file_holds_plain_theme_key() {
        let temp = tempdir().expect("tempdir");
        let mut prefs = FilePreferences::open(temp.path()).expect("open prefs");
        prefs.set_item("theme", "light");

        let raw = fs::read_to_string(temp.path().join(PREFS_FILE_NAME)).expect("read prefs");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(json["theme"], "light");
    }

    #[test]
    fn open_creates_the_data_dir() {
        let temp = tempdir().expect("tempdir");
        let data_dir = temp.path().join("nested").join("taskpad");

        let mut prefs = FilePreferences::open(&data_dir).expect("open prefs");
        assert!(data_dir.is_dir());
        save_theme_mode(&mut prefs, ThemeMode::Dark);
        assert!(data_dir.join(PREFS_FILE_NAME).is_file());
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join(PREFS_FILE_NAME), "{ not json").expect("write");

        let prefs = FilePreferences::open(temp.path()).expect("open prefs");
        assert_eq!(prefs.get_item("theme"), None);
        assert_eq!(load_theme_mode(&prefs, true), ThemeMode::Dark);
    }
}
