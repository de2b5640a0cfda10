pub mod cli;
pub mod config;
pub mod prefs;
pub mod render;
pub mod shell;

use std::ffi::OsString;
use std::io::{
  self,
  IsTerminal
};

use anyhow::Context;
use taskpad_model::{
  Session,
  load_theme_mode
};
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::from_args(raw_args)
      .unwrap_or_else(|err| err.exit());

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting taskpad"
  );

  let mut settings =
    config::Settings::load(
      cli.taskpadrc.as_deref()
    )?;
  settings
    .apply_overrides(cli.setting_pairs())?;
  debug!(?settings, "effective settings");

  let data_dir = settings
    .data_dir(cli.data.as_deref())
    .context(
      "failed to resolve data \
       directory"
    )?;

  let prefs =
    prefs::FilePreferences::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open preferences \
         in {}",
        data_dir.display()
      )
    })?;

  let theme = load_theme_mode(
    &prefs,
    settings.default_theme.is_dark()
  );
  let session = Session::new(
    theme,
    settings.page_size
  );
  let renderer =
    render::Renderer::new(&settings);
  let mut shell = shell::Shell::new(
    session, prefs, renderer
  );

  let stdout = io::stdout();
  let mut out = stdout.lock();

  if !cli.command.is_empty() {
    let line = cli
      .command
      .iter()
      .map(|arg| arg.to_string_lossy())
      .collect::<Vec<_>>()
      .join(" ");
    debug!(%line, "running one-shot command");
    shell.execute(&line, &mut out)?;
  } else {
    let stdin = io::stdin();
    let interactive =
      stdin.is_terminal();
    shell.run(
      stdin.lock(),
      &mut out,
      interactive
    )?;
  }

  info!("done");
  Ok(())
}
