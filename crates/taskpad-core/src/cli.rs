use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A `key=value` setting supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingArg {
    pub key: String,
    pub value: String,
}

impl SettingArg {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        }
    }

    /// Bare-word form, `rc.page.size=3` or `rc.page.size:3`.
    pub fn from_bare_word(word: &str) -> Option<Self> {
        let body = word.strip_prefix("rc.")?;
        let (key, value) = body.split_once('=').or_else(|| body.split_once(':'))?;
        Some(Self::new(key, value))
    }
}

impl FromStr for SettingArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_once('=')
            .map(|(key, value)| Self::new(key, value))
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskpad",
    version,
    about = "Taskpad: a single-session to-do list in the terminal",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    /// More log output (repeatable).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable).
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Override a taskpadrc setting.
    #[arg(long = "rc", value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub settings: Vec<SettingArg>,

    /// Read settings from this file instead of ~/.taskpadrc.
    #[arg(long = "taskpadrc", value_name = "PATH")]
    pub taskpadrc: Option<PathBuf>,

    /// Keep preferences in this directory.
    #[arg(long = "data", value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// A single shell command to run instead of starting a session.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<OsString>,
}

impl GlobalCli {
    /// Parses the process arguments. `rc.KEY=VALUE` words may appear anywhere
    /// and are collected ahead of the `--rc` flags.
    pub fn from_args(raw: Vec<OsString>) -> Result<Self, clap::Error> {
        let (bare, rest): (Vec<_>, Vec<_>) = raw
            .into_iter()
            .enumerate()
            .map(|(idx, arg)| {
                let setting = (idx > 0)
                    .then(|| arg.to_str().and_then(SettingArg::from_bare_word))
                    .flatten();
                (setting, arg)
            })
            .partition(|(setting, _)| setting.is_some());

        let mut cli = Self::try_parse_from(rest.into_iter().map(|(_, arg)| arg))?;
        let mut settings: Vec<SettingArg> =
            bare.into_iter().filter_map(|(setting, _)| setting).collect();
        debug!(count = settings.len(), "bare-word setting overrides");
        settings.append(&mut cli.settings);
        cli.settings = settings;
        Ok(cli)
    }

    pub fn setting_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings
            .iter()
            .map(|setting| (setting.key.as_str(), setting.value.as_str()))
    }
}

fn default_log_level(verbose: u8, quiet: u8) -> &'static str {
    match (quiet, verbose) {
        (2.., _) => "error",
        (1, _) | (0, 0) => "warn",
        (0, 1) => "info",
        (0, 2) => "debug",
        (0, _) => "trace",
    }
}

/// Logs go to stderr; stdout carries the task table.
pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_log_level(verbose, quiet))
            .map_err(|err| anyhow!("invalid log filter: {err}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .or_else(|err| {
            debug!(error = %err, "tracing subscriber already installed");
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::{GlobalCli, SettingArg, default_log_level};

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn pairs(cli: &GlobalCli) -> Vec<(String, String)> {
        cli.setting_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn bare_word_settings_come_before_flags() {
        let cli = GlobalCli::from_args(args(&[
            "taskpad",
            "--rc",
            "color=on",
            "rc.color=off",
            "rc.page.size:3",
            "list",
        ]))
        .expect("parse");
        assert_eq!(
            pairs(&cli),
            vec![
                ("color".to_string(), "off".to_string()),
                ("page.size".to_string(), "3".to_string()),
                ("color".to_string(), "on".to_string()),
            ]
        );
        assert_eq!(cli.command, args(&["list"]));
    }

    #[test]
    fn trailing_words_become_a_command() {
        let cli = GlobalCli::from_args(args(&["taskpad", "-vv", "theme", "dark"]))
            .expect("parse");
        assert_eq!(cli.verbose, 2);
        assert!(cli.settings.is_empty());
        assert_eq!(cli.command, args(&["theme", "dark"]));
    }

    #[test]
    fn rc_flag_needs_an_equals_sign() {
        assert!(GlobalCli::from_args(args(&["taskpad", "--rc", "color"])).is_err());
        assert_eq!(SettingArg::from_bare_word("rc.color"), None);
        assert_eq!(SettingArg::from_bare_word("record=1"), None);
    }

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(default_log_level(0, 0), "warn");
        assert_eq!(default_log_level(3, 0), "trace");
        assert_eq!(default_log_level(2, 1), "warn");
        assert_eq!(default_log_level(0, 2), "error");
    }
}
