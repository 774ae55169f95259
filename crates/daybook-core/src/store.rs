use anyhow::Context;
use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  error,
  info
};

use crate::storage::SlotStorage;
use crate::task::{
  Task,
  TaskId
};

/// The ordered task collection, newest
/// first, mirrored in full to one storage
/// slot after every change.
#[derive(Debug, Clone)]
pub struct TaskStore<S> {
  storage: S,
  key:     String,
  tasks:   Vec<Task>,
  last_id: u64
}

impl<S: SlotStorage> TaskStore<S> {
  /// Reads the slot once. Absent,
  /// unreadable, or malformed content
  /// yields an empty store.
  #[tracing::instrument(skip(storage))]
  pub fn load(
    storage: S,
    key: &str
  ) -> Self {
    let tasks = match storage
      .read_slot(key)
    {
      | Ok(Some(raw)) => {
        match decode_tasks(&raw) {
          | Ok(tasks) => tasks,
          | Err(err) => {
            error!(
              error = %err,
              key,
              "malformed task slot; starting empty"
            );
            Vec::new()
          }
        }
      }
      | Ok(None) => {
        debug!(key, "task slot absent");
        Vec::new()
      }
      | Err(err) => {
        error!(
          error = %err,
          key,
          "failed reading task slot; starting empty"
        );
        Vec::new()
      }
    };

    let last_id = tasks
      .iter()
      .map(|task| task.id.0)
      .max()
      .unwrap_or(0);

    info!(
      key,
      count = tasks.len(),
      "loaded task store"
    );

    Self {
      storage,
      key: key.to_string(),
      tasks,
      last_id
    }
  }

  #[must_use]
  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  #[must_use]
  pub fn get(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  #[must_use]
  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Millisecond timestamp of `now`, bumped
  /// past every id this store has seen.
  pub fn next_id(
    &mut self,
    now: DateTime<Utc>
  ) -> TaskId {
    let stamp = u64::try_from(
      now.timestamp_millis()
    )
    .unwrap_or(0);
    let id = stamp
      .max(self.last_id.saturating_add(1));
    self.last_id = id;
    TaskId(id)
  }

  #[tracing::instrument(skip(self, task), fields(id = %task.id))]
  pub fn add(
    &mut self,
    task: Task
  ) -> anyhow::Result<()> {
    self.last_id =
      self.last_id.max(task.id.0);
    self.tasks.insert(0, task);
    self.persist()
  }

  /// Returns whether a task was removed.
  #[tracing::instrument(skip(self))]
  pub fn remove(
    &mut self,
    id: TaskId
  ) -> anyhow::Result<bool> {
    let Some(idx) = self
      .tasks
      .iter()
      .position(|task| task.id == id)
    else {
      debug!("remove of unknown task ignored");
      return Ok(false);
    };

    self.tasks.remove(idx);
    self.persist()?;
    Ok(true)
  }

  /// Applies `change` to the matching task
  /// in place. Returns whether a task
  /// matched.
  #[tracing::instrument(skip(self, change))]
  pub fn update<F>(
    &mut self,
    id: TaskId,
    change: F
  ) -> anyhow::Result<bool>
  where
    F: FnOnce(&mut Task)
  {
    let Some(task) = self
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
    else {
      debug!("update of unknown task ignored");
      return Ok(false);
    };

    change(task);
    task.id = id;
    self.persist()?;
    Ok(true)
  }

  fn persist(&self) -> anyhow::Result<()> {
    let payload =
      encode_tasks(&self.tasks)?;
    self
      .storage
      .write_slot(&self.key, &payload)
      .with_context(|| {
        format!(
          "failed to persist task slot {}",
          self.key
        )
      })?;
    debug!(
      key = %self.key,
      count = self.tasks.len(),
      "persisted task slot"
    );
    Ok(())
  }
}

pub fn decode_tasks(
  raw: &str
) -> anyhow::Result<Vec<Task>> {
  serde_json::from_str(raw)
    .context("failed to decode task list")
}

pub fn encode_tasks(
  tasks: &[Task]
) -> anyhow::Result<String> {
  serde_json::to_string(tasks)
    .context("failed to encode task list")
}

#[cfg(test)]
mod tests {
  use chrono::{
    NaiveDate,
    NaiveTime,
    TimeZone
  };

  use super::*;
  use crate::storage::MemoryStorage;
  use crate::task::{
    Category,
    NewTask,
    Priority
  };

  const KEY: &str = "daybook.tasks";

  fn sample(
    id: u64,
    text: &str
  ) -> Task {
    Task::create(
      TaskId(id),
      NewTask {
        text:       text.to_string(),
        priority:   Priority::High,
        category:   Category::Work,
        due_date:   NaiveDate::from_ymd_opt(
          2026, 10, 16
        ),
        start_time: NaiveTime::from_hms_opt(
          9, 30, 0
        ),
        end_time:   None
      }
    )
  }

  #[test]
  fn absent_or_malformed_slot_loads_empty()
  {
    let absent = TaskStore::load(
      MemoryStorage::new(),
      KEY
    );
    assert!(absent.is_empty());

    for raw in [
      "not json",
      "{\"id\": 1}",
      "[{\"id\": 1, \"text\": \"x\", \"priority\": \"Urgent\"}]",
      "[{\"id\": 1, \"text\": \"x\", \"dueDate\": \"2026-13-01\"}]",
    ] {
      let store = TaskStore::load(
        MemoryStorage::with_slot(
          KEY, raw
        ),
        KEY
      );
      assert!(
        store.is_empty(),
        "expected empty store for {raw}"
      );
    }
  }

  #[test]
  fn add_prepends_and_persists() {
    let storage = MemoryStorage::new();
    let mut store =
      TaskStore::load(storage.clone(), KEY);

    store
      .add(sample(1, "first"))
      .expect("add first");
    store
      .add(sample(2, "second"))
      .expect("add second");

    let texts: Vec<&str> = store
      .tasks()
      .iter()
      .map(|task| task.text.as_str())
      .collect();
    assert_eq!(texts, vec![
      "second", "first"
    ]);

    let persisted = storage
      .read_slot(KEY)
      .expect("read")
      .expect("slot written");
    assert_eq!(
      decode_tasks(&persisted)
        .expect("decode"),
      store.tasks().to_vec()
    );
  }

  #[test]
  fn remove_unknown_id_changes_nothing() {
    let storage = MemoryStorage::new();
    let mut store =
      TaskStore::load(storage.clone(), KEY);
    store
      .add(sample(1, "keep"))
      .expect("add");
    let before = store.tasks().to_vec();

    let removed = store
      .remove(TaskId(99))
      .expect("remove");

    assert!(!removed);
    assert_eq!(store.tasks(), &before[..]);

    assert!(
      store
        .remove(TaskId(1))
        .expect("remove")
    );
    assert!(store.is_empty());
    assert_eq!(
      storage
        .read_slot(KEY)
        .expect("read")
        .as_deref(),
      Some("[]")
    );
  }

  #[test]
  fn update_keeps_order_and_id() {
    let mut store = TaskStore::load(
      MemoryStorage::new(),
      KEY
    );
    store
      .add(sample(1, "a"))
      .expect("add");
    store
      .add(sample(2, "b"))
      .expect("add");

    let changed = store
      .update(TaskId(1), |task| {
        task.completed = true;
        task.id = TaskId(500);
      })
      .expect("update");

    assert!(changed);
    assert_eq!(
      store.tasks()[1].id,
      TaskId(1)
    );
    assert!(store.tasks()[1].completed);
    assert!(!store.tasks()[0].completed);
    assert!(
      !store
        .update(TaskId(7), |task| {
          task.completed = true;
        })
        .expect("update")
    );
  }

  #[test]
  fn reload_round_trips_tasks() {
    let storage = MemoryStorage::new();
    let mut store =
      TaskStore::load(storage.clone(), KEY);
    store
      .add(sample(1, "one"))
      .expect("add");
    let mut undated = sample(2, "two");
    undated.due_date = None;
    undated.start_time = None;
    undated.category = Category::MonthlyGoals;
    store.add(undated).expect("add");
    store
      .update(TaskId(1), |task| {
        task.completed = true;
      })
      .expect("update");

    let reloaded =
      TaskStore::load(storage, KEY);

    assert_eq!(
      reloaded.tasks(),
      store.tasks()
    );
  }

  #[test]
  fn times_with_seconds_reload_equal() {
    let storage = MemoryStorage::new();
    let mut store =
      TaskStore::load(storage.clone(), KEY);
    let mut timed = sample(1, "timed");
    timed.start_time =
      crate::datetime::parse_clock_time(
        "08:15:30"
      )
      .expect("start time");
    store.add(timed).expect("add");

    let reloaded =
      TaskStore::load(storage, KEY);

    assert_eq!(
      reloaded.tasks(),
      store.tasks()
    );
    assert_eq!(
      reloaded.tasks()[0].start_time,
      NaiveTime::from_hms_opt(8, 15, 0)
    );
  }

  #[test]
  fn loaded_times_drop_seconds() {
    let raw = r#"[{
      "id": 1,
      "text": "x",
      "startTime": "08:15:30",
      "endTime": "08:15:00"
    }]"#;
    let storage =
      MemoryStorage::with_slot(KEY, raw);
    let mut store =
      TaskStore::load(storage.clone(), KEY);
    let loaded = &store.tasks()[0];
    assert_eq!(
      loaded.start_time,
      loaded.end_time
    );

    store
      .update(TaskId(1), |task| {
        task.completed = true;
      })
      .expect("update");
    let reloaded =
      TaskStore::load(storage, KEY);

    assert_eq!(
      reloaded.tasks(),
      store.tasks()
    );
  }

  #[test]
  fn ids_stay_unique_when_clock_stalls() {
    let mut store = TaskStore::load(
      MemoryStorage::new(),
      KEY
    );
    let now = Utc
      .with_ymd_and_hms(
        2026, 10, 16, 8, 0, 0
      )
      .single()
      .expect("valid now");

    let first = store.next_id(now);
    let second = store.next_id(now);
    let earlier = store.next_id(
      now - chrono::Duration::hours(1)
    );

    assert_eq!(
      first.0,
      now.timestamp_millis() as u64
    );
    assert!(second > first);
    assert!(earlier > second);
  }

  #[test]
  fn ids_skip_past_loaded_tasks() {
    let raw = encode_tasks(&[sample(
      9_000_000_000_000,
      "future"
    )])
    .expect("encode");
    let mut store = TaskStore::load(
      MemoryStorage::with_slot(KEY, &raw),
      KEY
    );
    let now = Utc
      .with_ymd_and_hms(
        2026, 10, 16, 8, 0, 0
      )
      .single()
      .expect("valid now");

    assert_eq!(
      store.next_id(now),
      TaskId(9_000_000_000_001)
    );
  }
}
