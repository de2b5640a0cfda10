use std::io::{self, IsTerminal, Write};

use taskpad_model::{Projection, Session, ThemeMode};
use unicode_width::UnicodeWidthStr;

use crate::config::Settings;

const TITLE: &str = "Task Manager";

struct Palette {
    title: &'static str,
    row: &'static str,
    id: &'static str,
    done: &'static str,
    muted: &'static str,
}

impl Palette {
    fn for_theme(theme: ThemeMode) -> Self {
        match theme {
            ThemeMode::Light => Self {
                title: "1;30",
                row: "33",
                id: "34",
                done: "9;32",
                muted: "90",
            },
            ThemeMode::Dark => Self {
                title: "1;97",
                row: "93",
                id: "94",
                done: "9;92",
                muted: "37",
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// Colors only when enabled and stdout is a terminal.
    pub fn new(settings: &Settings) -> Self {
        Self {
            color: settings.color && io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip_all, fields(page = session.view.page))]
    pub fn print_view<W: Write>(&self, mut out: W, session: &Session) -> anyhow::Result<()> {
        let palette = Palette::for_theme(session.theme);
        let projection = session.projection();

        writeln!(
            out,
            "{}  ({} theme)",
            self.paint(TITLE, palette.title),
            session.theme
        )?;

        let mut context = vec![format!("filter: {}", session.view.filter.label())];
        if !session.view.search.is_empty() {
            context.push(format!("search: \"{}\"", session.view.search));
        }
        writeln!(out, "{}", self.paint(&context.join("  "), palette.muted))?;
        writeln!(out)?;

        if !projection.visible.is_empty() {
            self.print_rows(&mut out, &projection, &palette)?;
        }

        if let Some(message) = projection.empty_message() {
            writeln!(out, "{}", self.paint(&message, palette.muted))?;
        }

        if projection.shows_pagination() {
            let prev = if projection.has_previous() { "< prev" } else { "      " };
            let next = if projection.has_next() { "next >" } else { "" };
            writeln!(out)?;
            let line = format!("{prev}  {}  {next}", projection.page_label());
            writeln!(out, "{}", line.trim_end())?;
        }

        if let Some(summary) = projection.summary() {
            writeln!(out)?;
            writeln!(out, "{}", self.paint(&summary, palette.muted))?;
        }

        Ok(())
    }

    fn print_rows<W: Write>(
        &self,
        out: &mut W,
        projection: &Projection,
        palette: &Palette,
    ) -> anyhow::Result<()> {
        let headers = vec![
            "#".to_string(),
            "ID".to_string(),
            "Done".to_string(),
            "Task".to_string(),
        ];

        let rows = projection
            .visible
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let mark = if task.completed { "[x]" } else { "[ ]" };
                let text = if task.completed {
                    self.paint(&task.text, palette.done)
                } else {
                    task.text.clone()
                };
                vec![
                    self.paint(&(idx + 1).to_string(), palette.row),
                    self.paint(&task.id.to_string(), palette.id),
                    mark.to_string(),
                    text,
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    pub fn print_message<W: Write>(&self, mut out: W, message: &str) -> anyhow::Result<()> {
        writeln!(out, "{message}")?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let last = column_count.saturating_sub(1);
    write_row(&mut writer, &headers, &widths, last)?;

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_row(&mut writer, &rule, &widths, last)?;

    for row in &rows {
        write_row(&mut writer, row, &widths, last)?;
    }

    Ok(())
}

fn write_row<W: Write>(
    writer: &mut W,
    cells: &[String],
    widths: &[usize],
    last: usize,
) -> anyhow::Result<()> {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if idx < last {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            line.push_str(&" ".repeat(widths[idx].saturating_sub(visible_width) + 1));
        }
    }
    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
