use std::collections::BTreeSet;

use chrono::{
  DateTime,
  NaiveDate,
  Utc
};
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::calendar::{
  MonthCursor,
  MonthGrid,
  build_month_grid
};
use crate::config::{
  BoardConfig,
  TaskDefaults
};
use crate::datetime::{
  parse_clock_time,
  parse_due_date
};
use crate::storage::SlotStorage;
use crate::store::TaskStore;
use crate::task::{
  Category,
  NewTask,
  Priority,
  Task,
  TaskId
};
use crate::views::{
  Folder,
  FolderSummary,
  due_dates,
  folder_summaries,
  folder_tasks,
  tasks_on,
  todays_schedule
};

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum Page {
  #[default]
  Today,
  Folders,
  Calendar
}

impl Page {
  pub const ALL: [Page; 3] = [
    Page::Today,
    Page::Folders,
    Page::Calendar
  ];

  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | Page::Today => "Today",
      | Page::Folders => "Folders",
      | Page::Calendar => "Calendar"
    }
  }
}

/// Raw input of the create form. Date and
/// time fields hold `YYYY-MM-DD` and
/// `HH:MM` strings; blank means unset.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskForm {
  pub text:       String,
  pub priority:   Option<Priority>,
  pub category:   Option<Category>,
  pub due_date:   String,
  pub start_time: String,
  pub end_time:   String
}

impl TaskForm {
  /// The priority a create would use:
  /// the chosen one, else the configured
  /// default.
  #[must_use]
  pub fn effective_priority(
    &self,
    defaults: &TaskDefaults
  ) -> Priority {
    self
      .priority
      .unwrap_or(defaults.priority)
  }

  #[must_use]
  pub fn effective_category(
    &self,
    defaults: &TaskDefaults
  ) -> Category {
    self
      .category
      .unwrap_or(defaults.category)
  }

  /// `Ok(None)` for blank text.
  pub fn validate(
    &self,
    defaults: &TaskDefaults
  ) -> anyhow::Result<Option<NewTask>> {
    let text = self.text.trim();
    if text.is_empty() {
      return Ok(None);
    }

    Ok(Some(NewTask {
      text:       text.to_string(),
      priority:   self
        .effective_priority(defaults),
      category:   self
        .effective_category(defaults),
      due_date:   parse_due_date(
        &self.due_date
      )?,
      start_time: parse_clock_time(
        &self.start_time
      )?,
      end_time:   parse_clock_time(
        &self.end_time
      )?
    }))
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct EditState {
  pub id:    TaskId,
  pub draft: String
}

/// Everything the front end can ask of
/// the board.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
  UpdateForm(TaskForm),
  Create(TaskForm),
  Delete(TaskId),
  Toggle(TaskId),
  StartEdit(TaskId),
  UpdateEditDraft(String),
  SaveEdit(String),
  CancelEdit,
  SelectFolder(Folder),
  SelectDate(NaiveDate),
  NavigateMonth(i32),
  NavigatePage(Page)
}

/// One render's worth of derived views.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
  pub today:          NaiveDate,
  pub schedule:       Vec<Task>,
  pub folder:         Folder,
  pub folder_tasks:   Vec<Task>,
  pub folders:        Vec<FolderSummary>,
  pub marked_days:    BTreeSet<NaiveDate>,
  pub selected_date:  NaiveDate,
  pub selected_tasks: Vec<Task>,
  pub month:          MonthGrid
}

/// The task store plus the selection
/// state the views depend on.
#[derive(Debug, Clone)]
pub struct TaskBoard<S> {
  store:         TaskStore<S>,
  config:        BoardConfig,
  page:          Page,
  folder:        Folder,
  selected_date: NaiveDate,
  month:         MonthCursor,
  form:          TaskForm,
  editing:       Option<EditState>
}

impl<S: SlotStorage> TaskBoard<S> {
  #[tracing::instrument(skip(storage, config))]
  pub fn open(
    storage: S,
    config: BoardConfig,
    today: NaiveDate
  ) -> Self {
    let store = TaskStore::load(
      storage,
      &config.storage_key
    );
    info!(
      tasks = store.len(),
      %today,
      "opened task board"
    );

    Self {
      store,
      config,
      page: Page::default(),
      folder: Folder::default(),
      selected_date: today,
      month: MonthCursor::containing(today),
      form: TaskForm::default(),
      editing: None
    }
  }

  #[must_use]
  pub fn tasks(&self) -> &[Task] {
    self.store.tasks()
  }

  #[must_use]
  pub fn store(&self) -> &TaskStore<S> {
    &self.store
  }

  #[must_use]
  pub fn config(&self) -> &BoardConfig {
    &self.config
  }

  #[must_use]
  pub fn page(&self) -> Page {
    self.page
  }

  #[must_use]
  pub fn folder(&self) -> Folder {
    self.folder
  }

  #[must_use]
  pub fn selected_date(&self) -> NaiveDate {
    self.selected_date
  }

  #[must_use]
  pub fn month(&self) -> MonthCursor {
    self.month
  }

  #[must_use]
  pub fn form(&self) -> &TaskForm {
    &self.form
  }

  #[must_use]
  pub fn editing(
    &self
  ) -> Option<&EditState> {
    self.editing.as_ref()
  }

  /// Applies one intent, stamping new ids
  /// with the current clock.
  pub fn dispatch(
    &mut self,
    intent: Intent
  ) {
    self.dispatch_at(intent, Utc::now());
  }

  #[tracing::instrument(skip(self, now))]
  pub fn dispatch_at(
    &mut self,
    intent: Intent,
    now: DateTime<Utc>
  ) {
    match intent {
      | Intent::UpdateForm(form) => {
        self.form = form;
      }
      | Intent::Create(form) => {
        self.create(&form, now);
      }
      | Intent::Delete(id) => {
        self.delete(id);
      }
      | Intent::Toggle(id) => {
        self.toggle(id);
      }
      | Intent::StartEdit(id) => {
        self.start_edit(id);
      }
      | Intent::UpdateEditDraft(text) => {
        if let Some(edit) =
          self.editing.as_mut()
        {
          edit.draft = text;
        }
      }
      | Intent::SaveEdit(text) => {
        self.save_edit(&text);
      }
      | Intent::CancelEdit => {
        self.cancel_edit();
      }
      | Intent::SelectFolder(folder) => {
        self.folder = folder;
      }
      | Intent::SelectDate(date) => {
        self.selected_date = date;
        self.month =
          MonthCursor::containing(date);
      }
      | Intent::NavigateMonth(delta) => {
        self.month =
          self.month.shift(delta);
      }
      | Intent::NavigatePage(page) => {
        self.page = page;
      }
    }
  }

  /// Adds a task built from `form`. Blank
  /// text or unreadable dates leave the
  /// board untouched; on success the form
  /// is cleared.
  pub fn create(
    &mut self,
    form: &TaskForm,
    now: DateTime<Utc>
  ) -> Option<TaskId> {
    let new = match form
      .validate(&self.config.defaults)
    {
      | Ok(Some(new)) => new,
      | Ok(None) => {
        debug!(
          "ignored create with blank text"
        );
        return None;
      }
      | Err(err) => {
        warn!(
          error = %err,
          "ignored create with invalid input"
        );
        return None;
      }
    };

    let id = self.store.next_id(now);
    let task = Task::create(id, new);
    info!(
      %id,
      priority = task.priority.label(),
      category = task.category.label(),
      due = ?task.due_date,
      "created task"
    );
    if let Err(err) = self.store.add(task) {
      error!(
        error = %err,
        %id,
        "failed to persist new task"
      );
    }
    self.form = TaskForm::default();
    Some(id)
  }

  pub fn delete(&mut self, id: TaskId) {
    match self.store.remove(id) {
      | Ok(true) => {
        info!(%id, "deleted task");
      }
      | Ok(false) => {}
      | Err(err) => {
        error!(
          error = %err,
          %id,
          "failed to persist delete"
        );
      }
    }
    if self
      .editing
      .as_ref()
      .is_some_and(|edit| edit.id == id)
    {
      self.editing = None;
    }
  }

  pub fn toggle(&mut self, id: TaskId) {
    let result =
      self.store.update(id, |task| {
        task.completed = !task.completed;
      });
    if let Err(err) = result {
      error!(
        error = %err,
        %id,
        "failed to persist toggle"
      );
    }
  }

  pub fn start_edit(&mut self, id: TaskId) {
    let Some(task) = self.store.get(id)
    else {
      debug!(
        %id,
        "edit of unknown task ignored"
      );
      return;
    };

    self.editing = Some(EditState {
      id,
      draft: task.text.clone()
    });
  }

  /// Writes `text` to the task being
  /// edited. Blank text closes the edit
  /// without a change.
  pub fn save_edit(&mut self, text: &str) {
    let Some(edit) = self.editing.take()
    else {
      return;
    };

    let text = text.trim();
    if text.is_empty() {
      debug!(
        id = %edit.id,
        "blank edit discarded"
      );
      return;
    }

    let result = self.store.update(
      edit.id,
      |task| {
        task.text = text.to_string();
      }
    );
    match result {
      | Ok(true) => {
        info!(
          id = %edit.id,
          "edited task text"
        );
      }
      | Ok(false) => {}
      | Err(err) => {
        error!(
          error = %err,
          id = %edit.id,
          "failed to persist edit"
        );
      }
    }
  }

  pub fn cancel_edit(&mut self) {
    self.editing = None;
  }

  /// Recomputes every view from the
  /// current tasks.
  #[must_use]
  pub fn view(
    &self,
    today: NaiveDate
  ) -> BoardView {
    let tasks = self.store.tasks();
    let marked_days = due_dates(tasks);
    let month = build_month_grid(
      self.month,
      self.config.week_start_day(),
      today,
      self.selected_date,
      &marked_days
    );

    BoardView {
      today,
      schedule: todays_schedule(
        tasks, today
      ),
      folder: self.folder,
      folder_tasks: folder_tasks(
        tasks,
        self.folder
      ),
      folders: folder_summaries(tasks),
      marked_days,
      selected_date: self.selected_date,
      selected_tasks: tasks_on(
        tasks,
        self.selected_date
      ),
      month
    }
  }
}
