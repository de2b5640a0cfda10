use taskpad_model::{
  Task,
  TaskId
};
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:          Task,
  pub is_dragging:   bool,
  pub on_toggle:     Callback<TaskId>,
  pub on_delete:     Callback<TaskId>,
  pub on_drag_start: Callback<TaskId>,
  pub on_drag_over:  Callback<TaskId>,
  pub on_drag_end:   Callback<()>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let task_id = props.task.id;

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer
            .set_data(
              "text/plain",
              &task_id.to_string()
            );
          data_transfer
            .set_effect_allowed("move");
        }
        on_drag_start.emit(task_id);
      }
    )
  };

  let ondragover = {
    let on_drag_over =
      props.on_drag_over.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        on_drag_over.emit(task_id);
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_: DragEvent| {
      on_drag_end.emit(());
    })
  };

  let on_toggle_click = {
    let on_toggle =
      props.on_toggle.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_toggle.emit(task_id);
      }
    )
  };

  let on_delete_click = {
    let on_delete =
      props.on_delete.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_delete.emit(task_id);
      }
    )
  };

  let completed = props.task.completed;

  html! {
      <div
          class={classes!("task-row", props.is_dragging.then_some("dragging"))}
          draggable="true"
          {ondragstart}
          {ondragover}
          {ondragend}
      >
          <span class="grip" aria-hidden="true">{ "⋮⋮" }</span>
          <button
              class={classes!("check", completed.then_some("on"))}
              aria-label={if completed { "Mark task active" } else { "Mark task completed" }}
              onclick={on_toggle_click}
          >
              { if completed { "✓" } else { "" } }
          </button>
          <span class={classes!("task-text", completed.then_some("done"))}>
              { &props.task.text }
          </span>
          <button class="btn danger icon" aria-label="Delete task" onclick={on_delete_click}>
              { "✕" }
          </button>
      </div>
  }
}
