pub mod ids;
pub mod session;
pub mod store;
pub mod task;
pub mod theme;
pub mod view;

pub use ids::IdGenerator;
pub use session::{
  Action,
  Session
};
pub use store::TaskStore;
pub use task::{
  Task,
  TaskId
};
pub use theme::{
  MemoryStorage,
  PreferenceStorage,
  THEME_STORAGE_KEY,
  ThemeMode,
  UnknownTheme,
  load_theme_mode,
  save_theme_mode
};
pub use view::{
  DEFAULT_PAGE_SIZE,
  FilterMode,
  Projection,
  UnknownFilter,
  ViewState
};
