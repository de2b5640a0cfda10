use std::rc::Rc;

use taskpad_model::{
  Action,
  DEFAULT_PAGE_SIZE,
  Session,
  load_theme_mode
};
use yew::Reducible;

use super::storage::{
  BrowserStorage,
  system_prefers_dark
};

#[derive(Clone, PartialEq)]
pub(crate) struct AppState(
  pub(crate) Session
);

impl AppState {
  pub(crate) fn load() -> Self {
    let theme = load_theme_mode(
      &BrowserStorage,
      system_prefers_dark()
    );
    Self(Session::new(
      theme,
      DEFAULT_PAGE_SIZE
    ))
  }
}

impl Reducible for AppState {
  type Action = Action;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let Self(session) =
      Rc::unwrap_or_clone(self);
    Rc::new(Self(session.apply(action)))
  }
}
