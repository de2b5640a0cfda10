mod pager;
mod task_form;
mod task_list;
mod task_list_row;
mod task_toolbar;

pub use pager::Pager;
pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use task_toolbar::TaskToolbar;
