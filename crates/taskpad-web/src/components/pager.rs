use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PagerProps {
  pub label:        String,
  pub has_previous: bool,
  pub has_next:     bool,
  pub on_previous:  Callback<MouseEvent>,
  pub on_next:      Callback<MouseEvent>
}

#[function_component(Pager)]
pub fn pager(
  props: &PagerProps
) -> Html {
  html! {
      <div class="pager">
          <button
              class="btn"
              disabled={!props.has_previous}
              onclick={props.on_previous.clone()}
          >
              { "Previous" }
          </button>
          <span class="pager-label">{ &props.label }</span>
          <button
              class="btn"
              disabled={!props.has_next}
              onclick={props.on_next.clone()}
          >
              { "Next" }
          </button>
      </div>
  }
}
