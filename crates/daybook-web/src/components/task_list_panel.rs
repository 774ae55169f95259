use chrono::NaiveDate;
use daybook_core::{
  EditState,
  Intent,
  Task
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskRow;

#[derive(Properties, PartialEq)]
pub struct TaskListPanelProps {
  pub title:       String,
  pub empty_label: String,
  pub tasks:       Vec<Task>,
  pub today:       NaiveDate,
  pub editing:     Option<EditState>,
  pub on_intent:   Callback<Intent>
}

#[function_component(TaskListPanel)]
pub fn task_list_panel(
  props: &TaskListPanelProps
) -> Html {
  html! {
      <div class="panel list">
          <div class="header">{ props.title.clone() }</div>
          {
              if props.tasks.is_empty() {
                  html! { <div class="empty">{ props.empty_label.clone() }</div> }
              } else {
                  html! {}
              }
          }
          {
              for props.tasks.iter().cloned().map(|task| {
                  let draft = props
                      .editing
                      .as_ref()
                      .filter(|edit| edit.id == task.id)
                      .map(|edit| edit.draft.clone());
                  let key = task.id.to_string();
                  html! {
                      <TaskRow
                          key={key}
                          task={task}
                          today={props.today}
                          draft={draft}
                          on_intent={props.on_intent.clone()}
                      />
                  }
              })
          }
      </div>
  }
}
