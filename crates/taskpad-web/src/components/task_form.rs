use web_sys::{
  HtmlInputElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub on_add: Callback<String>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let draft = use_state(String::new);

  let oninput = {
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        draft.set(input.value());
      }
    )
  };

  let onsubmit = {
    let draft = draft.clone();
    let on_add = props.on_add.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        if draft.trim().is_empty() {
          return;
        }
        on_add.emit((*draft).clone());
        draft.set(String::new());
      }
    )
  };

  html! {
      <form class="task-form" {onsubmit}>
          <input
              type="text"
              class="input"
              placeholder="Add a new task..."
              value={(*draft).clone()}
              {oninput}
          />
          <button type="submit" class="btn primary">{ "Add" }</button>
      </form>
  }
}
