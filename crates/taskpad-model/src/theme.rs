use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  warn
};

pub const THEME_STORAGE_KEY: &str =
  "theme";

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
  #[default]
  Light,
  Dark
}

impl ThemeMode {
  pub fn from_dark_flag(
    is_dark: bool
  ) -> Self {
    if is_dark {
      Self::Dark
    } else {
      Self::Light
    }
  }

  pub fn is_dark(self) -> bool {
    self == Self::Dark
  }

  pub fn as_class(self) -> &'static str {
    match self {
      | Self::Light => "theme-light",
      | Self::Dark => "theme-dark"
    }
  }

  pub fn next(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "Dark",
      | Self::Dark => "Light"
    }
  }
}

impl fmt::Display for ThemeMode {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.storage_value())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "unknown theme '{}' (expected \
       light or dark)",
      self.0
    )
  }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for ThemeMode {
  type Err = UnknownTheme;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "light" => Ok(Self::Light),
      | "dark" => Ok(Self::Dark),
      | _ => Err(UnknownTheme(
        s.to_string()
      ))
    }
  }
}

/// Key/value preference storage shaped
/// like the browser's `localStorage`.
/// Failures are the implementation's to
/// log; callers treat storage as best
/// effort.
pub trait PreferenceStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Option<String>;

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  );
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct MemoryStorage {
  items: BTreeMap<String, String>
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl PreferenceStorage for MemoryStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Option<String> {
    self.items.get(key).cloned()
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) {
    self
      .items
      .insert(key.to_string(), value.to_string());
  }
}

/// Stored value wins; with nothing
/// stored the system preference decides.
pub fn load_theme_mode(
  storage: &impl PreferenceStorage,
  system_prefers_dark: bool
) -> ThemeMode {
  match storage
    .get_item(THEME_STORAGE_KEY)
    .as_deref()
  {
    | Some("dark") => ThemeMode::Dark,
    | Some("light") => ThemeMode::Light,
    | Some(other) => {
      warn!(
        value = other,
        "ignoring unrecognised stored \
         theme"
      );
      ThemeMode::from_dark_flag(
        system_prefers_dark
      )
    }
    | None => {
      debug!(
        system_prefers_dark,
        "no stored theme, following \
         system preference"
      );
      ThemeMode::from_dark_flag(
        system_prefers_dark
      )
    }
  }
}

pub fn save_theme_mode(
  storage: &mut impl PreferenceStorage,
  theme: ThemeMode
) {
  storage.set_item(
    THEME_STORAGE_KEY,
    theme.storage_value()
  );
}

#[cfg(test)]
mod tests {
  use super::{
    MemoryStorage,
    PreferenceStorage,
    THEME_STORAGE_KEY,
    ThemeMode,
    UnknownTheme,
    load_theme_mode,
    save_theme_mode
  };

  #[test]
  fn falls_back_to_system_preference() {
    let storage = MemoryStorage::new();
    assert_eq!(
      load_theme_mode(&storage, true),
      ThemeMode::Dark
    );
    assert_eq!(
      load_theme_mode(&storage, false),
      ThemeMode::Light
    );
  }

  #[test]
  fn stored_value_overrides_system() {
    let mut storage = MemoryStorage::new();
    save_theme_mode(
      &mut storage,
      ThemeMode::Light
    );
    assert_eq!(
      load_theme_mode(&storage, true),
      ThemeMode::Light
    );
  }

  #[test]
  fn saved_value_matches_mode() {
    let mut storage = MemoryStorage::new();
    save_theme_mode(
      &mut storage,
      ThemeMode::Dark
    );
    assert_eq!(
      storage
        .get_item(THEME_STORAGE_KEY)
        .as_deref(),
      Some("dark")
    );
  }

  #[test]
  fn garbage_falls_back_to_system() {
    let mut storage = MemoryStorage::new();
    storage
      .set_item(THEME_STORAGE_KEY, "night");
    assert_eq!(
      load_theme_mode(&storage, true),
      ThemeMode::Dark
    );
  }

  #[test]
  fn toggling_alternates() {
    assert_eq!(
      ThemeMode::Light.next(),
      ThemeMode::Dark
    );
    assert_eq!(
      ThemeMode::Dark.next().next(),
      ThemeMode::Dark
    );
  }

  #[test]
  fn parsing_rejects_unknown_names() {
    assert_eq!(
      " Dark ".parse::<ThemeMode>(),
      Ok(ThemeMode::Dark)
    );
    let err = "sepia"
      .parse::<ThemeMode>()
      .expect_err("unknown theme");
    assert_eq!(
      err,
      UnknownTheme("sepia".to_string())
    );
    assert!(
      err.to_string().contains("sepia")
    );
  }
}
