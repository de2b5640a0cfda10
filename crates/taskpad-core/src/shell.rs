use std::io::{BufRead, Write};

use anyhow::{Context, anyhow};
use taskpad_model::{
    Action, FilterMode, PreferenceStorage, Session, TaskId, ThemeMode, save_theme_mode,
};
use tracing::{debug, info, instrument};

use crate::render::Renderer;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add", "toggle", "done", "delete", "move", "search", "filter", "next", "prev", "theme",
        "list", "help", "quit", "exit",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

/// Points at a task either by its row on the current page (1-based) or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRef {
    Row(usize),
    Id(TaskId),
}

impl std::str::FromStr for TaskRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(raw) = s.strip_prefix("id:") {
            let id = raw
                .parse::<TaskId>()
                .with_context(|| format!("invalid task id: {raw}"))?;
            return Ok(Self::Id(id));
        }

        match s.parse::<usize>() {
            Ok(row) if row > 0 => Ok(Self::Row(row)),
            _ => Err(anyhow!("expected a row number or id:<id>, got: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Set(ThemeMode),
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(TaskRef),
    Delete(TaskRef),
    Move(TaskRef, TaskRef),
    Search(String),
    Filter(FilterMode),
    Next,
    Prev,
    Theme(Option<ThemeChange>),
    List,
    Help,
    Quit,
}

impl Command {
    /// `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        let Some(word) = line.split_whitespace().next() else {
            return Ok(None);
        };
        let rest = line[word.len()..].trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let known = known_command_names();
        let command = expand_command_abbrev(word, &known)
            .ok_or_else(|| anyhow!("unknown or ambiguous command: {word}"))?;
        debug!(token = word, expanded = command, "resolved command token");

        let parsed = match command {
            "add" => Self::Add(rest.to_string()),
            "toggle" | "done" => Self::Toggle(single_ref(command, &args)?),
            "delete" => Self::Delete(single_ref(command, &args)?),
            "move" => match args.as_slice() {
                [from, to] => Self::Move(from.parse()?, to.parse()?),
                _ => return Err(anyhow!("usage: move <row> <row>")),
            },
            "search" => Self::Search(rest.to_string()),
            "filter" => match args.as_slice() {
                [mode] => Self::Filter(mode.parse::<FilterMode>()?),
                _ => return Err(anyhow!("usage: filter all|active|completed")),
            },
            "next" => Self::Next,
            "prev" => Self::Prev,
            "theme" => match args.as_slice() {
                [] => Self::Theme(None),
                ["toggle"] => Self::Theme(Some(ThemeChange::Toggle)),
                [mode] => Self::Theme(Some(ThemeChange::Set(
                    mode.parse::<ThemeMode>()?,
                ))),
                _ => return Err(anyhow!("usage: theme [light|dark|toggle]")),
            },
            "list" => Self::List,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(anyhow!("unknown command: {other}")),
        };

        Ok(Some(parsed))
    }
}

fn single_ref(command: &str, args: &[&str]) -> anyhow::Result<TaskRef> {
    match args {
        [one] => one.parse(),
        _ => Err(anyhow!("usage: {command} <row>")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
commands:
  add <text>                    add a task
  toggle <ref> | done <ref>     flip a task between active and completed
  delete <ref>                  remove a task
  move <ref> <ref>              move the first task into the second one's place
  search [text]                 case-insensitive search (no text clears it)
  filter all|active|completed   narrow by completion
  next | prev                   page through results
  theme [light|dark|toggle]     show or change the theme
  list                          show the current page
  help                          this text
  quit | exit                   end the session

<ref> is a row number on the current page, or id:<task id>.
Commands may be abbreviated (e.g. `del 2`).";

/// Interactive front-end: owns the session value and the preference storage
/// and turns shell lines into session actions.
pub struct Shell<P: PreferenceStorage> {
    session: Session,
    prefs: P,
    renderer: Renderer,
}

impl<P: PreferenceStorage> Shell<P> {
    pub fn new(session: Session, prefs: P, renderer: Renderer) -> Self {
        Self {
            session,
            prefs,
            renderer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    #[instrument(skip(self, input, out))]
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
        interactive: bool,
    ) -> anyhow::Result<()> {
        if interactive {
            self.renderer.print_view(&mut out, &self.session)?;
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                write!(out, "> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                debug!("input closed");
                break;
            };
            let line = line.context("failed reading command")?;

            if self.execute(&line, &mut out)? == Flow::Quit {
                break;
            }
        }

        info!(tasks = self.session.store.len(), "session ended");
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, line: &str, mut out: W) -> anyhow::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                debug!(error = %err, line, "rejected command");
                self.renderer.print_message(&mut out, &format!("{err:#}"))?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Add(text) => self.dispatch(Action::Add(text)),
            Command::Toggle(target) => {
                if let Some(id) = self.resolve(target, &mut out)? {
                    self.dispatch(Action::Toggle(id));
                }
            }
            Command::Delete(target) => {
                if let Some(id) = self.resolve(target, &mut out)? {
                    self.dispatch(Action::Delete(id));
                }
            }
            Command::Move(from, to) => {
                let dragged = self.resolve(from, &mut out)?;
                let target = self.resolve(to, &mut out)?;
                if let (Some(dragged), Some(target)) = (dragged, target) {
                    self.dispatch(Action::DragStart(dragged));
                    self.dispatch(Action::DragOver(target));
                    self.dispatch(Action::DragEnd);
                }
            }
            Command::Search(text) => self.dispatch(Action::SetSearch(text)),
            Command::Filter(mode) => self.dispatch(Action::SetFilter(mode)),
            Command::Next => self.dispatch(Action::NextPage),
            Command::Prev => self.dispatch(Action::PreviousPage),
            Command::Theme(None) => {
                self.renderer
                    .print_message(&mut out, &format!("theme: {}", self.session.theme))?;
                return Ok(Flow::Continue);
            }
            Command::Theme(Some(ThemeChange::Set(mode))) => self.dispatch(Action::SetTheme(mode)),
            Command::Theme(Some(ThemeChange::Toggle)) => self.dispatch(Action::ToggleTheme),
            Command::List => {}
            Command::Help => {
                self.renderer.print_message(&mut out, HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        self.renderer.print_view(&mut out, &self.session)?;
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, action: Action) {
        let before = self.session.theme;
        self.session = std::mem::take(&mut self.session).apply(action);
        if self.session.theme != before {
            info!(theme = %self.session.theme, "theme changed");
            save_theme_mode(&mut self.prefs, self.session.theme);
        }
    }

    fn resolve<W: Write>(&self, target: TaskRef, out: &mut W) -> anyhow::Result<Option<TaskId>> {
        let found = match target {
            TaskRef::Row(row) => row.checked_sub(1).and_then(|idx| {
                self.session
                    .projection()
                    .visible
                    .get(idx)
                    .map(|task| task.id)
            }),
            TaskRef::Id(id) => self.session.store.contains(id).then_some(id),
        };

        if found.is_none() {
            let what = match target {
                TaskRef::Row(row) => format!("no task on row {row} of this page"),
                TaskRef::Id(id) => format!("no task with id {id}"),
            };
            debug!(?target, "unresolved task reference");
            self.renderer.print_message(out, &what)?;
        }

        Ok(found)
    }
}
