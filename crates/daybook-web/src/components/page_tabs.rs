use daybook_core::{
  Intent,
  Page
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PageTabsProps {
  pub active:    Page,
  pub on_intent: Callback<Intent>
}

#[function_component(PageTabs)]
pub fn page_tabs(
  props: &PageTabsProps
) -> Html {
  html! {
      <nav class="page-tabs">
          {
              for Page::ALL.into_iter().map(|page| {
                  let on_intent = props.on_intent.clone();
                  let class = if page == props.active { "page-tab active" } else { "page-tab" };
                  html! {
                      <button
                          type="button"
                          class={class}
                          onclick={move |_| on_intent.emit(Intent::NavigatePage(page))}
                      >
                          { page.label() }
                      </button>
                  }
              })
          }
      </nav>
  }
}
