use tracing::{
  debug,
  trace
};

use crate::ids::IdGenerator;
use crate::store::TaskStore;
use crate::task::TaskId;
use crate::theme::ThemeMode;
use crate::view::{
  DEFAULT_PAGE_SIZE,
  FilterMode,
  Projection,
  ViewState,
  filter_tasks,
  page_count
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Add(String),
  Toggle(TaskId),
  Delete(TaskId),
  DragStart(TaskId),
  DragOver(TaskId),
  DragEnd,
  SetSearch(String),
  SetFilter(FilterMode),
  PreviousPage,
  NextPage,
  SetTheme(ThemeMode),
  ToggleTheme
}

/// Everything one session of the app
/// holds. Updates go through
/// [`Session::apply`], which consumes
/// the current value and returns its
/// replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub store:     TaskStore,
  pub view:      ViewState,
  pub theme:     ThemeMode,
  pub page_size: usize,
  ids:           IdGenerator
}

impl Default for Session {
  fn default() -> Self {
    Self::new(
      ThemeMode::default(),
      DEFAULT_PAGE_SIZE
    )
  }
}

impl Session {
  pub fn new(
    theme: ThemeMode,
    page_size: usize
  ) -> Self {
    Self {
      store: TaskStore::new(),
      view: ViewState::default(),
      theme,
      page_size: page_size.max(1),
      ids: IdGenerator::default()
    }
  }

  pub fn projection(&self) -> Projection {
    Projection::compute(
      &self.store,
      &self.view,
      self.page_size
    )
  }

  fn filtered_count(&self) -> usize {
    filter_tasks(
      &self.store,
      &self.view.search,
      self.view.filter
    )
    .len()
  }

  pub fn apply(
    mut self,
    action: Action
  ) -> Self {
    trace!(?action, "applying action");

    match action {
      | Action::Add(text) => {
        if text.trim().is_empty() {
          debug!("ignoring blank submission");
          return self;
        }
        let id = self.ids.next();
        self.store = self.store.add(id, &text);
      }
      | Action::Toggle(id) => {
        self.store = self.store.toggle(id);
      }
      | Action::Delete(id) => {
        self.store = self.store.delete(id);
        let filtered = self.filtered_count();
        if self.view.page > 1
          && filtered
            <= (self.view.page - 1)
              * self.page_size
        {
          self.view.page -= 1;
          debug!(
            page = self.view.page,
            "page emptied by delete, \
             stepping back"
          );
        }
      }
      | Action::DragStart(id) => {
        if self.store.contains(id) {
          self.view.dragging = Some(id);
        }
      }
      | Action::DragOver(target) => {
        if let Some(dragged) =
          self.view.dragging
        {
          self.store = self
            .store
            .reorder(dragged, target);
        }
      }
      | Action::DragEnd => {
        self.view.dragging = None;
      }
      | Action::SetSearch(search) => {
        self.view.search = search;
      }
      | Action::SetFilter(filter) => {
        self.view.filter = filter;
      }
      | Action::PreviousPage => {
        self.view.page =
          self.view.page.saturating_sub(1).max(1);
      }
      | Action::NextPage => {
        let last = page_count(
          self.filtered_count(),
          self.page_size
        )
        .max(1);
        self.view.page =
          (self.view.page + 1).min(last);
      }
      | Action::SetTheme(theme) => {
        self.theme = theme;
      }
      | Action::ToggleTheme => {
        self.theme = self.theme.next();
      }
    }

    self.clamp_page();
    self
  }

  /// Keeps the stored page inside
  /// `1..=total_pages` once a search,
  /// filter, toggle or delete shrinks the
  /// filtered list.
  fn clamp_page(&mut self) {
    let last = page_count(
      self.filtered_count(),
      self.page_size
    )
    .max(1);
    if self.view.page > last {
      debug!(
        from = self.view.page,
        to = last,
        "clamping page to filtered list"
      );
      self.view.page = last;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Action,
    Session
  };
  use crate::task::TaskId;
  use crate::theme::ThemeMode;
  use crate::view::FilterMode;

  fn with_n(n: usize) -> Session {
    (1..=n).fold(
      Session::default(),
      |session, i| {
        session.apply(Action::Add(format!(
          "task {i}"
        )))
      }
    )
  }

  fn id_at(
    session: &Session,
    idx: usize
  ) -> TaskId {
    session.store.tasks()[idx].id
  }

  #[test]
  fn whitespace_submission_is_ignored() {
    let session = Session::default()
      .apply(Action::Add("   ".to_string()));
    assert!(session.store.is_empty());
  }

  #[test]
  fn add_then_toggle_twice() {
    let session = Session::default()
      .apply(Action::Add(
        "Buy milk".to_string()
      ));
    let id = id_at(&session, 0);

    let session =
      session.apply(Action::Toggle(id));
    assert_eq!(
      session.store.get(id).map(|t| t.completed),
      Some(true)
    );

    let session =
      session.apply(Action::Toggle(id));
    assert_eq!(
      session.store.get(id).map(|t| t.completed),
      Some(false)
    );
  }

  #[test]
  fn rapid_adds_get_unique_ids() {
    let session = with_n(50);
    let mut ids: Vec<_> = session
      .store
      .tasks()
      .iter()
      .map(|t| t.id)
      .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
  }

  #[test]
  fn deleting_last_task_on_page_steps_back()
   {
    let session = with_n(6)
      .apply(Action::NextPage);
    assert_eq!(session.view.page, 2);

    let last = id_at(&session, 5);
    let session =
      session.apply(Action::Delete(last));
    assert_eq!(session.view.page, 1);
    assert_eq!(session.store.len(), 5);
  }

  #[test]
  fn deleting_with_remaining_rows_keeps_page()
   {
    let session = with_n(7)
      .apply(Action::NextPage);
    let last = id_at(&session, 6);
    let session =
      session.apply(Action::Delete(last));
    assert_eq!(session.view.page, 2);
  }

  #[test]
  fn deleting_unknown_id_is_noop() {
    let session = with_n(3);
    let after = session
      .clone()
      .apply(Action::Delete(TaskId(1)));
    assert_eq!(after.store, session.store);
  }

  #[test]
  fn paging_is_bounded() {
    let session = with_n(11);
    let session = session
      .apply(Action::PreviousPage);
    assert_eq!(session.view.page, 1);

    let session = session
      .apply(Action::NextPage)
      .apply(Action::NextPage)
      .apply(Action::NextPage);
    assert_eq!(session.view.page, 3);
  }

  #[test]
  fn next_page_on_empty_list_stays_on_first()
   {
    let session = Session::default()
      .apply(Action::NextPage);
    assert_eq!(session.view.page, 1);
  }

  #[test]
  fn drag_over_reorders_only_while_dragging()
   {
    let session = with_n(3);
    let (a, c) =
      (id_at(&session, 0), id_at(&session, 2));

    let idle = session
      .clone()
      .apply(Action::DragOver(c));
    assert_eq!(idle.store, session.store);

    let moved = session
      .apply(Action::DragStart(a))
      .apply(Action::DragOver(c))
      .apply(Action::DragEnd);
    assert_eq!(id_at(&moved, 2), a);
    assert_eq!(moved.store.len(), 3);
    assert_eq!(moved.view.dragging, None);
  }

  #[test]
  fn active_filter_after_completing_everything()
   {
    let session = with_n(2);
    let ids: Vec<_> = session
      .store
      .tasks()
      .iter()
      .map(|t| t.id)
      .collect();
    let session = ids
      .into_iter()
      .fold(session, |s, id| {
        s.apply(Action::Toggle(id))
      })
      .apply(Action::SetFilter(
        FilterMode::Active
      ));
    assert!(
      session.projection().visible.is_empty()
    );
  }

  fn complete_first(
    session: Session,
    n: usize
  ) -> Session {
    let ids: Vec<_> = session.store.tasks()
      [..n]
      .iter()
      .map(|t| t.id)
      .collect();
    ids.into_iter().fold(session, |s, id| {
      s.apply(Action::Toggle(id))
    })
  }

  #[test]
  fn narrowing_filter_pulls_stored_page_back()
   {
    let session = complete_first(with_n(12), 5)
      .apply(Action::NextPage)
      .apply(Action::NextPage);
    assert_eq!(session.view.page, 3);

    let session = session.apply(
      Action::SetFilter(FilterMode::Active)
    );
    assert_eq!(session.view.page, 2);
    assert_eq!(
      session.projection().total_pages,
      2
    );

    let session =
      session.apply(Action::PreviousPage);
    assert_eq!(session.view.page, 1);
    assert!(!session.projection().has_previous());
  }

  #[test]
  fn narrowing_search_pulls_stored_page_back()
   {
    let session = with_n(11)
      .apply(Action::NextPage)
      .apply(Action::NextPage)
      .apply(Action::SetSearch(
        "TASK 1".to_string()
      ));
    // "task 1", "task 10", "task 11"
    assert_eq!(session.view.page, 1);
    assert_eq!(
      session.projection().visible.len(),
      3
    );
  }

  #[test]
  fn completing_under_active_filter_clamps_page()
   {
    let session = with_n(6)
      .apply(Action::SetFilter(
        FilterMode::Active
      ))
      .apply(Action::NextPage);
    assert_eq!(session.view.page, 2);

    let sixth = id_at(&session, 5);
    let session =
      session.apply(Action::Toggle(sixth));
    assert_eq!(session.view.page, 1);
  }

  #[test]
  fn deleting_last_active_row_on_page_two_steps_back()
   {
    let session = complete_first(with_n(7), 1)
      .apply(Action::SetFilter(
        FilterMode::Active
      ))
      .apply(Action::NextPage);
    assert_eq!(session.view.page, 2);
    assert_eq!(
      session.projection().visible.len(),
      1
    );

    let last = id_at(&session, 6);
    let session =
      session.apply(Action::Delete(last));
    assert_eq!(session.view.page, 1);
    assert_eq!(
      session.projection().visible.len(),
      5
    );
  }

  #[test]
  fn deleting_last_searched_row_on_page_two_steps_back()
   {
    let items = [
      "milk", "milk", "bread", "milk",
      "milk", "milk", "eggs", "milk"
    ];
    let session = items
      .iter()
      .enumerate()
      .fold(
        Session::default(),
        |s, (i, item)| {
          s.apply(Action::Add(format!(
            "buy {item} {i}"
          )))
        }
      )
      .apply(Action::SetSearch(
        "Milk".to_string()
      ))
      .apply(Action::NextPage);
    assert_eq!(session.view.page, 2);

    let last = id_at(&session, 7);
    let session =
      session.apply(Action::Delete(last));
    assert_eq!(session.view.page, 1);
    assert_eq!(
      session.projection().filtered_count,
      5
    );
  }

  #[test]
  fn theme_toggles() {
    let session = Session::default()
      .apply(Action::ToggleTheme);
    assert_eq!(session.theme, ThemeMode::Dark);
    let session = session.apply(
      Action::SetTheme(ThemeMode::Light)
    );
    assert_eq!(
      session.theme,
      ThemeMode::Light
    );
  }
}
