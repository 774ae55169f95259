use daybook_core::config::TaskDefaults;
use daybook_core::{
  Category,
  Intent,
  Priority,
  TaskForm
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskComposerProps {
  pub form:      TaskForm,
  pub defaults:  TaskDefaults,
  pub on_intent: Callback<Intent>
}

/// Builds an input handler that writes
/// the field value into a copy of the
/// form.
fn field_input(
  form: &TaskForm,
  on_intent: &Callback<Intent>,
  apply: fn(&mut TaskForm, String)
) -> Callback<InputEvent> {
  let form = form.clone();
  let on_intent = on_intent.clone();
  Callback::from(move |e: InputEvent| {
    let input: HtmlInputElement =
      e.target_unchecked_into();
    let mut next = form.clone();
    apply(&mut next, input.value());
    on_intent
      .emit(Intent::UpdateForm(next));
  })
}

#[function_component(TaskComposer)]
pub fn task_composer(
  props: &TaskComposerProps
) -> Html {
  let form = props.form.clone();

  let on_text = field_input(
    &form,
    &props.on_intent,
    |form, value| form.text = value
  );
  let on_due = field_input(
    &form,
    &props.on_intent,
    |form, value| form.due_date = value
  );
  let on_start = field_input(
    &form,
    &props.on_intent,
    |form, value| form.start_time = value
  );
  let on_end = field_input(
    &form,
    &props.on_intent,
    |form, value| form.end_time = value
  );

  let on_priority = {
    let form = form.clone();
    let on_intent =
      props.on_intent.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let mut next = form.clone();
      next.priority =
        select.value().parse().ok();
      on_intent
        .emit(Intent::UpdateForm(next));
    })
  };

  let on_category = {
    let form = form.clone();
    let on_intent =
      props.on_intent.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let mut next = form.clone();
      next.category =
        select.value().parse().ok();
      on_intent
        .emit(Intent::UpdateForm(next));
    })
  };

  let on_submit = {
    let form = form.clone();
    let on_intent =
      props.on_intent.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_intent.emit(Intent::Create(
          form.clone()
        ));
      }
    )
  };

  let priority =
    form.effective_priority(&props.defaults);
  let category =
    form.effective_category(&props.defaults);

  html! {
      <form class="panel composer" onsubmit={on_submit}>
          <input
              class="composer-text"
              placeholder="What needs doing?"
              value={form.text.clone()}
              oninput={on_text}
          />
          <select onchange={on_priority}>
              {
                  for Priority::ALL.into_iter().map(|option| html! {
                      <option value={option.label()} selected={option == priority}>
                          { option.label() }
                      </option>
                  })
              }
          </select>
          <select onchange={on_category}>
              {
                  for Category::ALL.into_iter().map(|option| html! {
                      <option value={option.label()} selected={option == category}>
                          { option.label() }
                      </option>
                  })
              }
          </select>
          <input type="date" value={form.due_date.clone()} oninput={on_due} />
          <input type="time" value={form.start_time.clone()} oninput={on_start} />
          <input type="time" value={form.end_time.clone()} oninput={on_end} />
          <button type="submit" class="btn primary">{ "Add Task" }</button>
      </form>
  }
}
