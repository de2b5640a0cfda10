use std::fmt;
use std::str::FromStr;

use serde::{
  Deserialize,
  Serialize
};

use crate::store::TaskStore;
use crate::task::{
  Task,
  TaskId
};

pub const DEFAULT_PAGE_SIZE: usize = 5;

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
pub enum FilterMode {
  #[default]
  All,
  Active,
  Completed
}

impl FilterMode {
  pub fn all() -> [Self; 3] {
    [
      Self::All,
      Self::Active,
      Self::Completed
    ]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::All => "all",
      | Self::Active => "active",
      | Self::Completed => "completed"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::All => "All Tasks",
      | Self::Active => "Active Tasks",
      | Self::Completed => {
        "Completed Tasks"
      }
    }
  }

  pub fn matches(
    self,
    task: &Task
  ) -> bool {
    match self {
      | Self::All => true,
      | Self::Active => !task.completed,
      | Self::Completed => task.completed
    }
  }
}

impl fmt::Display for FilterMode {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_key())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl fmt::Display for UnknownFilter {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "unknown filter '{}' (expected \
       all, active or completed)",
      self.0
    )
  }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for FilterMode {
  type Err = UnknownFilter;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "all" => Ok(Self::All),
      | "active" => Ok(Self::Active),
      | "completed" => {
        Ok(Self::Completed)
      }
      | _ => Err(UnknownFilter(
        s.to_string()
      ))
    }
  }
}

/// Ephemeral UI state layered over the
/// task list.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ViewState {
  pub search:   String,
  pub filter:   FilterMode,
  pub page:     usize,
  pub dragging: Option<TaskId>
}

impl Default for ViewState {
  fn default() -> Self {
    Self {
      search:   String::new(),
      filter:   FilterMode::All,
      page:     1,
      dragging: None
    }
  }
}

pub fn filter_tasks<'a>(
  store: &'a TaskStore,
  search: &str,
  filter: FilterMode
) -> Vec<&'a Task> {
  let needle = search.to_lowercase();
  store
    .tasks()
    .iter()
    .filter(|task| {
      task.matches_search(&needle)
        && filter.matches(task)
    })
    .collect()
}

pub fn page_count(
  filtered: usize,
  page_size: usize
) -> usize {
  filtered.div_ceil(page_size.max(1))
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct Projection {
  pub visible:        Vec<Task>,
  pub filtered_count: usize,
  pub total_count:    usize,
  pub page:           usize,
  pub total_pages:    usize,
  pub page_size:      usize,
  search_active:      bool,
  filter:             FilterMode
}

impl Projection {
  pub fn compute(
    store: &TaskStore,
    view: &ViewState,
    page_size: usize
  ) -> Self {
    let page_size = page_size.max(1);
    let filtered = filter_tasks(
      store,
      &view.search,
      view.filter
    );
    let total_pages =
      page_count(filtered.len(), page_size);
    let page =
      view.page.clamp(1, total_pages.max(1));

    let visible = filtered
      .iter()
      .skip((page - 1) * page_size)
      .take(page_size)
      .map(|task| (*task).clone())
      .collect();

    Self {
      visible,
      filtered_count: filtered.len(),
      total_count: store.len(),
      page,
      total_pages,
      page_size,
      search_active: !view
        .search
        .is_empty(),
      filter: view.filter
    }
  }

  pub fn shows_pagination(&self) -> bool {
    self.filtered_count > self.page_size
  }

  pub fn has_previous(&self) -> bool {
    self.page > 1
  }

  pub fn has_next(&self) -> bool {
    self.page < self.total_pages
  }

  pub fn page_label(&self) -> String {
    format!(
      "Page {} of {}",
      self.page, self.total_pages
    )
  }

  pub fn empty_message(
    &self
  ) -> Option<String> {
    if self.filtered_count > 0 {
      return None;
    }

    let message = if self.search_active {
      "No tasks match your search"
        .to_string()
    } else if self.filter
      != FilterMode::All
    {
      format!(
        "No {} tasks found",
        self.filter.as_key()
      )
    } else {
      "No tasks yet. Add one to get \
       started!"
        .to_string()
    };
    Some(message)
  }

  pub fn summary(&self) -> Option<String> {
    if self.total_count == 0 {
      return None;
    }

    Some(match self.filter {
      | FilterMode::All => format!(
        "{} total tasks",
        self.total_count
      ),
      | _ => format!(
        "Showing {} of {} tasks",
        self.filtered_count,
        self.total_count
      )
    })
  }
}
