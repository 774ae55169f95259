use chrono::NaiveDate;
use daybook_core::datetime::{
  format_due_date,
  time_window_label
};
use daybook_core::{
  Intent,
  Priority,
  Task
};
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  KeyboardEvent,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task:      Task,
  pub today:     NaiveDate,
  /// Draft text when this row is the one
  /// being edited.
  pub draft:     Option<String>,
  pub on_intent: Callback<Intent>
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let task = &props.task;
  let id = task.id;
  let status = task.status(props.today);

  let priority_class =
    match task.priority {
      | Priority::High => "badge high",
      | Priority::Medium => {
        "badge medium"
      }
      | Priority::Low => "badge low"
    };

  let on_toggle = {
    let on_intent =
      props.on_intent.clone();
    Callback::from(move |_| {
      on_intent.emit(Intent::Toggle(id))
    })
  };
  let on_delete = {
    let on_intent =
      props.on_intent.clone();
    Callback::from(move |_| {
      on_intent.emit(Intent::Delete(id))
    })
  };
  let on_start_edit = {
    let on_intent =
      props.on_intent.clone();
    Callback::from(move |_| {
      on_intent
        .emit(Intent::StartEdit(id))
    })
  };

  let text = match props.draft.clone() {
    | Some(draft) => {
      let on_input = {
        let on_intent =
          props.on_intent.clone();
        Callback::from(
          move |e: InputEvent| {
            let input: HtmlInputElement =
              e.target_unchecked_into();
            on_intent.emit(
              Intent::UpdateEditDraft(
                input.value()
              )
            );
          }
        )
      };
      let on_key = {
        let on_intent =
          props.on_intent.clone();
        let draft = draft.clone();
        Callback::from(
          move |e: KeyboardEvent| {
            match e.key().as_str() {
              | "Enter" => {
                on_intent.emit(
                  Intent::SaveEdit(
                    draft.clone()
                  )
                )
              }
              | "Escape" => {
                on_intent.emit(
                  Intent::CancelEdit
                )
              }
              | _ => {}
            }
          }
        )
      };
      let on_save = {
        let on_intent =
          props.on_intent.clone();
        let draft = draft.clone();
        Callback::from(move |_| {
          on_intent.emit(
            Intent::SaveEdit(
              draft.clone()
            )
          )
        })
      };
      let on_cancel = {
        let on_intent =
          props.on_intent.clone();
        Callback::from(move |_| {
          on_intent
            .emit(Intent::CancelEdit)
        })
      };
      html! {
          <div class="task-edit">
              <input value={draft} oninput={on_input} onkeydown={on_key} />
              <button type="button" class="btn" onclick={on_save}>{ "Save" }</button>
              <button type="button" class="btn" onclick={on_cancel}>{ "Cancel" }</button>
          </div>
      }
    }
    | None => {
      html! {
          <div class="task-text" ondblclick={on_start_edit.clone()}>
              { task.text.clone() }
          </div>
      }
    }
  };

  let due = task.due_date.map(|day| {
    html! {
        <span class={classes!(
            "badge",
            "due",
            status.is_overdue.then_some("overdue"),
            status.is_due_today.then_some("due-today")
        )}>
            { format_due_date(day) }
        </span>
    }
  });

  html! {
      <div class={classes!("row", task.completed.then_some("done"))}>
          <input type="checkbox" checked={task.completed} onclick={on_toggle} />
          <div class="task-main">
              { text }
              <div class="task-meta">
                  <span class={priority_class}>{ task.priority.label() }</span>
                  <span class="badge">{ task.category.label() }</span>
                  { for due.into_iter() }
                  <span class="badge time">
                      { time_window_label(task.start_time, task.end_time) }
                  </span>
              </div>
          </div>
          <div class="task-actions">
              <button type="button" class="btn" onclick={on_start_edit}>{ "Edit" }</button>
              <button type="button" class="btn danger" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </div>
  }
}
