use std::rc::Rc;

use daybook_core::datetime::today_local;
use daybook_core::{
  BoardConfig,
  Intent,
  Page,
  TaskBoard
};
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use crate::components::{
  CalendarPanel,
  FolderPanel,
  PageTabs,
  TaskComposer,
  TaskListPanel
};
use crate::storage::LocalStorage;

struct BoardState {
  board: TaskBoard<LocalStorage>
}

impl Reducible for BoardState {
  type Action = Intent;

  fn reduce(
    self: Rc<Self>,
    intent: Intent
  ) -> Rc<Self> {
    let mut board = self.board.clone();
    board.dispatch(intent);
    Rc::new(Self { board })
  }
}

fn open_board() -> BoardState {
  BoardState {
    board: TaskBoard::open(
      LocalStorage,
      BoardConfig::load(),
      today_local()
    )
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let state = use_reducer(open_board);

  {
    use_effect_with((), move |_| {
      tracing::debug!(
        "frontend mounted"
      );
      || ()
    });
  }

  let on_intent = {
    let state = state.clone();
    Callback::from(
      move |intent: Intent| {
        tracing::debug!(
          ?intent,
          "dispatching intent"
        );
        state.dispatch(intent);
      }
    )
  };

  let board = &state.board;
  let view = board.view(today_local());
  let editing = board.editing().cloned();

  let body = match board.page() {
    | Page::Today => {
      html! {
          <>
              <TaskComposer
                  form={board.form().clone()}
                  defaults={board.config().defaults.clone()}
                  on_intent={on_intent.clone()}
              />
              <TaskListPanel
                  title="Today's Schedule"
                  empty_label="Nothing due today."
                  tasks={view.schedule.clone()}
                  today={view.today}
                  editing={editing.clone()}
                  on_intent={on_intent.clone()}
              />
          </>
      }
    }
    | Page::Folders => {
      html! {
          <>
              <FolderPanel
                  folders={view.folders.clone()}
                  active={view.folder}
                  on_intent={on_intent.clone()}
              />
              <TaskListPanel
                  title={view.folder.label().to_string()}
                  empty_label="No tasks in this folder."
                  tasks={view.folder_tasks.clone()}
                  today={view.today}
                  editing={editing.clone()}
                  on_intent={on_intent.clone()}
              />
          </>
      }
    }
    | Page::Calendar => {
      html! {
          <>
              <CalendarPanel
                  grid={view.month.clone()}
                  on_intent={on_intent.clone()}
              />
              <TaskListPanel
                  title={daybook_core::datetime::format_due_date(view.selected_date)}
                  empty_label="No tasks on this day."
                  tasks={view.selected_tasks.clone()}
                  today={view.today}
                  editing={editing.clone()}
                  on_intent={on_intent.clone()}
              />
          </>
      }
    }
  };

  html! {
      <div class="daybook">
          <header class="daybook-header">
              <h1>{ "Daybook" }</h1>
              <PageTabs active={board.page()} on_intent={on_intent.clone()} />
          </header>
          <main class="daybook-body">{ body }</main>
      </div>
  }
}
