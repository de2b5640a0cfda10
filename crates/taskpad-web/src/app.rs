mod state;
mod storage;

use gloo::console::log;
use taskpad_model::{
  Action,
  FilterMode,
  TaskId,
  save_theme_mode
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  classes,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use self::state::AppState;
use self::storage::{
  BrowserStorage,
  apply_document_theme
};
use crate::components::{
  Pager,
  TaskForm,
  TaskList,
  TaskToolbar
};

#[function_component(App)]
pub fn app() -> Html {
  let state = use_reducer(AppState::load);
  let theme = state.0.theme;

  {
    use_effect_with(theme, |theme| {
      apply_document_theme(*theme);
      save_theme_mode(
        &mut BrowserStorage,
        *theme
      );
      ui_debug(
        "theme.applied",
        theme.storage_value()
      );
      || ()
    });
  }

  let on_toggle_theme = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(Action::ToggleTheme);
    })
  };

  let on_add = {
    let state = state.clone();
    Callback::from(move |text: String| {
      ui_debug("action.add", &text);
      state.dispatch(Action::Add(text));
    })
  };

  let on_search = {
    let state = state.clone();
    Callback::from(move |text: String| {
      state.dispatch(Action::SetSearch(text));
    })
  };

  let on_filter = {
    let state = state.clone();
    Callback::from(
      move |mode: FilterMode| {
        ui_debug(
          "action.filter",
          mode.as_key()
        );
        state.dispatch(Action::SetFilter(
          mode
        ));
      }
    )
  };

  let on_toggle = {
    let state = state.clone();
    Callback::from(move |id: TaskId| {
      state.dispatch(Action::Toggle(id));
    })
  };

  let on_delete = {
    let state = state.clone();
    Callback::from(move |id: TaskId| {
      ui_debug(
        "action.delete",
        &id.to_string()
      );
      state.dispatch(Action::Delete(id));
    })
  };

  let on_drag_start = {
    let state = state.clone();
    Callback::from(move |id: TaskId| {
      state.dispatch(Action::DragStart(id));
    })
  };

  let on_drag_over = {
    let state = state.clone();
    Callback::from(move |id: TaskId| {
      state.dispatch(Action::DragOver(id));
    })
  };

  let on_drag_end = {
    let state = state.clone();
    Callback::from(move |()| {
      state.dispatch(Action::DragEnd);
    })
  };

  let on_previous = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(Action::PreviousPage);
    })
  };

  let on_next = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(Action::NextPage);
    })
  };

  let session = &state.0;
  let projection = session.projection();

  html! {
      <div class={classes!("app", theme.as_class())}>
          <div class="card">
              <div class="topbar">
                  <h1 class="brand">{ "Task Manager" }</h1>
                  <button
                      class="btn"
                      aria-label="Toggle theme"
                      onclick={on_toggle_theme}
                  >
                      { theme.toggle_label() }
                  </button>
              </div>

              <TaskForm {on_add} />

              <TaskToolbar
                  search={session.view.search.clone()}
                  filter={session.view.filter}
                  {on_search}
                  {on_filter}
              />

              <TaskList
                  tasks={projection.visible.clone()}
                  dragging={session.view.dragging}
                  {on_toggle}
                  {on_delete}
                  {on_drag_start}
                  {on_drag_over}
                  {on_drag_end}
              />

              {
                  match projection.empty_message() {
                      Some(message) => html! { <div class="empty">{ message }</div> },
                      None => html! {},
                  }
              }

              {
                  if projection.shows_pagination() {
                      html! {
                          <Pager
                              label={projection.page_label()}
                              has_previous={projection.has_previous()}
                              has_next={projection.has_next()}
                              {on_previous}
                              {on_next}
                          />
                      }
                  } else {
                      html! {}
                  }
              }

              {
                  match projection.summary() {
                      Some(summary) => html! { <div class="summary">{ summary }</div> },
                      None => html! {},
                  }
              }
          </div>
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
