use taskpad_model::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:         Vec<Task>,
  pub dragging:      Option<TaskId>,
  pub on_toggle:     Callback<TaskId>,
  pub on_delete:     Callback<TaskId>,
  pub on_drag_start: Callback<TaskId>,
  pub on_drag_over:  Callback<TaskId>,
  pub on_drag_end:   Callback<()>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <div class="task-list">
          {
              for props.tasks.iter().cloned().map(|task| {
                  let key = task.id.to_string();
                  let is_dragging = props.dragging == Some(task.id);
                  html! {
                      <TaskListRow
                          key={key}
                          {is_dragging}
                          {task}
                          on_toggle={props.on_toggle.clone()}
                          on_delete={props.on_delete.clone()}
                          on_drag_start={props.on_drag_start.clone()}
                          on_drag_over={props.on_drag_over.clone()}
                          on_drag_end={props.on_drag_end.clone()}
                      />
                  }
              })
          }
      </div>
  }
}
