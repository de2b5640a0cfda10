use taskpad_model::FilterMode;
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskToolbarProps {
  pub search:    String,
  pub filter:    FilterMode,
  pub on_search: Callback<String>,
  pub on_filter: Callback<FilterMode>
}

#[function_component(TaskToolbar)]
pub fn task_toolbar(
  props: &TaskToolbarProps
) -> Html {
  let oninput = {
    let on_search =
      props.on_search.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        on_search.emit(input.value());
      }
    )
  };

  let onchange = {
    let on_filter =
      props.on_filter.clone();
    Callback::from(
      move |event: Event| {
        let select: HtmlSelectElement =
          event.target_unchecked_into();
        match select
          .value()
          .parse::<FilterMode>()
        {
          | Ok(mode) => on_filter.emit(mode),
          | Err(error) => {
            tracing::warn!(
              %error,
              "ignoring unknown filter \
               option"
            )
          }
        }
      }
    )
  };

  html! {
      <div class="toolbar">
          <input
              type="search"
              class="input search"
              placeholder="Search tasks..."
              value={props.search.clone()}
              {oninput}
          />
          <select class="input filter" {onchange}>
              {
                  for FilterMode::all().into_iter().map(|mode| html! {
                      <option
                          value={mode.as_key()}
                          selected={mode == props.filter}
                      >
                          { mode.label() }
                      </option>
                  })
              }
          </select>
      </div>
  }
}
