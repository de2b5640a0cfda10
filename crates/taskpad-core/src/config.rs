use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use taskpad_model::{
  DEFAULT_PAGE_SIZE,
  ThemeMode
};
use tracing::{
  debug,
  info,
  warn
};

pub const RC_ENV_VAR: &str =
  "TASKPADRC";

const DEFAULT_DATA_DIR: &str =
  ".taskpad";

/// Typed view of `~/.taskpadrc`.
///
/// Every key is validated when it is
/// read, so a bad value fails at
/// startup instead of mid-session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub data_location: Option<PathBuf>,
  pub color:         bool,
  pub page_size:     usize,
  pub default_theme: ThemeMode
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      data_location: None,
      color:         true,
      page_size:     DEFAULT_PAGE_SIZE,
      default_theme: ThemeMode::Light
    }
  }
}

enum RcLine<'a> {
  Include(&'a str),
  Assign(&'a str, &'a str)
}

fn parse_rc_line(
  raw: &str
) -> anyhow::Result<Option<RcLine<'_>>>
{
  let line = match raw.split_once('#') {
    | Some((before, _)) => before,
    | None => raw
  }
  .trim();

  if line.is_empty() {
    return Ok(None);
  }

  if let Some(target) =
    line.strip_prefix("include ")
  {
    let target = target.trim();
    if target.is_empty() {
      bail!(
        "include needs a file name"
      );
    }
    return Ok(Some(RcLine::Include(
      target
    )));
  }

  let (key, value) = line
    .split_once('=')
    .ok_or_else(|| {
      anyhow!("expected key = value")
    })?;
  Ok(Some(RcLine::Assign(
    key.trim(),
    value.trim()
  )))
}

impl Settings {
  /// Reads the rc file named by
  /// `rc_override`, `$TASKPADRC` or
  /// `~/.taskpadrc`, in that order.
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut settings = Self::default();

    match rc_location(rc_override) {
      | Some(path) => {
        info!(rc = %path.display(), "reading taskpadrc");
        settings.read_rc(
          &path,
          &mut Vec::new()
        )?;
      }
      | None => {
        debug!(
          "no taskpadrc; using \
           built-in settings"
        );
      }
    }

    Ok(settings)
  }

  /// Applies one `key`/`value` pair.
  /// Unknown keys are logged and
  /// skipped.
  pub fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    match key {
      | "data.location" => {
        self.data_location =
          Some(expand_tilde(value));
      }
      | "color" => {
        self.color = parse_switch(value)
          .ok_or_else(|| {
            anyhow!(
              "color must be on or \
               off, got '{value}'"
            )
          })?;
      }
      | "page.size" => {
        let size = value
          .parse::<usize>()
          .with_context(|| {
            format!(
              "page.size must be a \
               number, got '{value}'"
            )
          })?;
        if size == 0 {
          bail!(
            "page.size must be at \
             least 1"
          );
        }
        self.page_size = size;
      }
      | "theme.default" => {
        self.default_theme =
          value.parse()?;
      }
      | other => {
        warn!(
          key = other,
          "ignoring unknown setting"
        );
      }
    }
    Ok(())
  }

  pub fn apply_overrides<'a, I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (&'a str, &'a str)
    >
  {
    for (key, value) in overrides {
      debug!(key, value, "command-line override");
      self.set(key, value).with_context(
        || format!("invalid override {key}={value}")
      )?;
    }
    Ok(())
  }

  /// `--data` wins over
  /// `data.location`, which wins over
  /// `~/.taskpad`.
  pub fn data_dir(
    &self,
    override_dir: Option<&Path>
  ) -> anyhow::Result<PathBuf> {
    if let Some(dir) = override_dir {
      return Ok(dir.to_path_buf());
    }
    if let Some(dir) =
      &self.data_location
    {
      return Ok(dir.clone());
    }
    dirs::home_dir()
      .map(|home| {
        home.join(DEFAULT_DATA_DIR)
      })
      .ok_or_else(|| {
        anyhow!(
          "cannot determine home \
           directory; pass --data"
        )
      })
  }

  /// `chain` holds the files currently
  /// being read so an include loop is
  /// reported instead of recursing.
  fn read_rc(
    &mut self,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let canonical = path
      .canonicalize()
      .with_context(|| {
        format!(
          "failed to open {}",
          path.display()
        )
      })?;
    if chain.contains(&canonical) {
      bail!(
        "include cycle at {}",
        path.display()
      );
    }

    let text =
      fs::read_to_string(&canonical)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    let base = canonical
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_default();

    chain.push(canonical);
    for (idx, raw) in
      text.lines().enumerate()
    {
      let at = || {
        format!(
          "{}:{}",
          path.display(),
          idx + 1
        )
      };

      match parse_rc_line(raw)
        .with_context(at)?
      {
        | None => {}
        | Some(RcLine::Include(
          target
        )) => {
          let target = base
            .join(expand_tilde(target));
          if target.exists() {
            self
              .read_rc(&target, chain)?;
          } else {
            warn!(
              include = %target.display(),
              "included file missing; skipping"
            );
          }
        }
        | Some(RcLine::Assign(
          key,
          value
        )) => {
          self
            .set(key, value)
            .with_context(at)?;
        }
      }
    }
    chain.pop();

    Ok(())
  }
}

fn parse_switch(
  value: &str
) -> Option<bool> {
  match value
    .to_ascii_lowercase()
    .as_str()
  {
    | "on" | "yes" | "true" | "1" => {
      Some(true)
    }
    | "off" | "no" | "false" | "0" => {
      Some(false)
    }
    | _ => None
  }
}

fn rc_location(
  rc_override: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = rc_override {
    return Some(path.to_path_buf());
  }

  match std::env::var_os(RC_ENV_VAR) {
    | Some(value)
      if value == "/dev/null" =>
    {
      None
    }
    | Some(value) => {
      Some(PathBuf::from(value))
    }
    | None => dirs::home_dir()
      .map(|home| {
        home.join(".taskpadrc")
      })
      .filter(|path| path.exists())
  }
}

fn expand_tilde(raw: &str) -> PathBuf {
  match (
    raw.strip_prefix("~/"),
    dirs::home_dir()
  ) {
    | (Some(rest), Some(home)) => {
      home.join(rest)
    }
    | _ => PathBuf::from(raw)
  }
}
