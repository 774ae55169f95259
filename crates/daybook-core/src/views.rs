use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::task::{
  Category,
  Task
};

pub const ALL_FOLDER_LABEL: &str = "All";

/// A category filter, or the `All`
/// sentinel meaning no filter.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
)]
pub enum Folder {
  #[default]
  All,
  Category(Category)
}

impl Folder {
  #[must_use]
  pub fn all_folders() -> Vec<Folder> {
    std::iter::once(Folder::All)
      .chain(
        Category::ALL
          .into_iter()
          .map(Folder::Category)
      )
      .collect()
  }

  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | Folder::All => ALL_FOLDER_LABEL,
      | Folder::Category(category) => {
        category.label()
      }
    }
  }

  #[must_use]
  pub fn admits(
    self,
    task: &Task
  ) -> bool {
    match self {
      | Folder::All => true,
      | Folder::Category(category) => {
        task.category == category
      }
    }
  }
}

impl fmt::Display for Folder {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for Folder {
  type Err = anyhow::Error;

  fn from_str(
    raw: &str
  ) -> Result<Self, Self::Err> {
    if raw
      .trim()
      .eq_ignore_ascii_case(
        ALL_FOLDER_LABEL
      )
    {
      return Ok(Folder::All);
    }
    raw.parse().map(Folder::Category)
  }
}

/// Task counts shown next to a folder.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct FolderSummary {
  pub folder:    Folder,
  pub total:     usize,
  pub completed: usize
}

/// Ordering for today's schedule:
/// priority rank, then start time, with
/// timed tasks ahead of untimed ones.
#[must_use]
pub fn schedule_order(
  a: &Task,
  b: &Task
) -> Ordering {
  a.priority
    .rank()
    .cmp(&b.priority.rank())
    .then_with(|| {
      match (a.start_time, b.start_time)
      {
        | (Some(left), Some(right)) => {
          left.cmp(&right)
        }
        | (Some(_), None) => {
          Ordering::Less
        }
        | (None, Some(_)) => {
          Ordering::Greater
        }
        | (None, None) => {
          Ordering::Equal
        }
      }
    })
}

#[must_use]
pub fn todays_schedule(
  tasks: &[Task],
  today: NaiveDate
) -> Vec<Task> {
  let mut due: Vec<Task> = tasks
    .iter()
    .filter(|task| task.is_due_on(today))
    .cloned()
    .collect();
  // sort_by is stable; untimed ties keep
  // store order.
  due.sort_by(schedule_order);
  due
}

#[must_use]
pub fn folder_tasks(
  tasks: &[Task],
  folder: Folder
) -> Vec<Task> {
  tasks
    .iter()
    .filter(|task| folder.admits(task))
    .cloned()
    .collect()
}

#[must_use]
pub fn due_dates(
  tasks: &[Task]
) -> BTreeSet<NaiveDate> {
  tasks
    .iter()
    .filter_map(|task| task.due_date)
    .collect()
}

#[must_use]
pub fn tasks_on(
  tasks: &[Task],
  day: NaiveDate
) -> Vec<Task> {
  tasks
    .iter()
    .filter(|task| task.is_due_on(day))
    .cloned()
    .collect()
}

#[must_use]
pub fn folder_summaries(
  tasks: &[Task]
) -> Vec<FolderSummary> {
  Folder::all_folders()
    .into_iter()
    .map(|folder| {
      let (total, completed) = tasks
        .iter()
        .filter(|task| folder.admits(task))
        .fold((0, 0), |(total, done), task| {
          (
            total + 1,
            done + usize::from(task.completed)
          )
        });
      FolderSummary {
        folder,
        total,
        completed
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::NaiveTime;

  use super::*;
  use crate::task::{
    NewTask,
    Priority,
    TaskId
  };

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16)
      .expect("valid date")
  }

  fn task(
    id: u64,
    priority: Priority,
    category: Category,
    due: Option<NaiveDate>,
    start: Option<(u32, u32)>
  ) -> Task {
    Task::create(TaskId(id), NewTask {
      text: format!("task {id}"),
      priority,
      category,
      due_date: due,
      start_time: start.and_then(|(h, m)| {
        NaiveTime::from_hms_opt(h, m, 0)
      }),
      end_time: None
    })
  }

  fn ids(tasks: &[Task]) -> Vec<u64> {
    tasks
      .iter()
      .map(|task| task.id.0)
      .collect()
  }

  #[test]
  fn schedule_sorts_priority_then_start() {
    let a = task(
      1,
      Priority::Low,
      Category::Work,
      Some(today()),
      Some((9, 0))
    );
    let b = task(
      2,
      Priority::High,
      Category::Work,
      Some(today()),
      Some((17, 0))
    );
    let c = task(
      3,
      Priority::High,
      Category::Work,
      Some(today()),
      Some((8, 0))
    );

    let schedule =
      todays_schedule(&[a, b, c], today());

    assert_eq!(ids(&schedule), vec![3, 2, 1]);
  }

  #[test]
  fn schedule_puts_timed_tasks_first_and_keeps_untimed_order()
  {
    let tasks = vec![
      task(
        1,
        Priority::Medium,
        Category::Personal,
        Some(today()),
        None
      ),
      task(
        2,
        Priority::Medium,
        Category::Personal,
        Some(today()),
        Some((23, 0))
      ),
      task(
        3,
        Priority::Medium,
        Category::Personal,
        Some(today()),
        None
      ),
      task(
        4,
        Priority::Medium,
        Category::Personal,
        today().succ_opt(),
        Some((1, 0))
      ),
    ];

    let schedule =
      todays_schedule(&tasks, today());

    assert_eq!(ids(&schedule), vec![2, 1, 3]);
  }

  #[test]
  fn undated_tasks_only_show_in_folders() {
    let tasks = vec![
      task(
        1,
        Priority::High,
        Category::DailyGoals,
        None,
        Some((9, 0))
      ),
      task(
        2,
        Priority::Low,
        Category::Work,
        Some(today()),
        None
      ),
    ];

    assert_eq!(
      ids(&todays_schedule(&tasks, today())),
      vec![2]
    );
    assert_eq!(
      ids(&tasks_on(&tasks, today())),
      vec![2]
    );
    assert_eq!(
      ids(&folder_tasks(&tasks, Folder::All)),
      vec![1, 2]
    );
    assert_eq!(
      ids(&folder_tasks(
        &tasks,
        Folder::Category(Category::DailyGoals)
      )),
      vec![1]
    );
    assert_eq!(
      due_dates(&tasks).len(),
      1
    );
  }

  #[test]
  fn folder_filter_preserves_store_order() {
    let tasks = vec![
      task(5, Priority::Low, Category::Work, None, None),
      task(4, Priority::High, Category::Personal, None, None),
      task(3, Priority::Medium, Category::Work, None, None),
    ];

    assert_eq!(
      ids(&folder_tasks(&tasks, Folder::All)),
      vec![5, 4, 3]
    );
    assert_eq!(
      ids(&folder_tasks(
        &tasks,
        Folder::Category(Category::Work)
      )),
      vec![5, 3]
    );
    assert!(
      folder_tasks(
        &tasks,
        Folder::Category(Category::MonthlyGoals)
      )
      .is_empty()
    );
  }

  #[test]
  fn due_dates_are_distinct_and_ignore_completion()
  {
    let tomorrow =
      today().succ_opt().expect("tomorrow");
    let mut done = task(
      1,
      Priority::Low,
      Category::Work,
      Some(tomorrow),
      None
    );
    done.completed = true;
    let tasks = vec![
      done,
      task(2, Priority::Low, Category::Work, Some(today()), None),
      task(3, Priority::Low, Category::Work, Some(today()), None),
      task(4, Priority::Low, Category::Work, None, None),
    ];

    let dates = due_dates(&tasks);

    assert_eq!(
      dates.into_iter().collect::<Vec<_>>(),
      vec![today(), tomorrow]
    );
  }

  #[test]
  fn summaries_count_every_folder() {
    let mut done = task(
      1,
      Priority::Low,
      Category::Work,
      None,
      None
    );
    done.completed = true;
    let tasks = vec![
      done,
      task(2, Priority::Low, Category::Work, None, None),
      task(3, Priority::Low, Category::Personal, None, None),
    ];

    let summaries = folder_summaries(&tasks);

    assert_eq!(summaries.len(), 6);
    assert_eq!(summaries[0], FolderSummary {
      folder:    Folder::All,
      total:     3,
      completed: 1
    });
    assert_eq!(summaries[2], FolderSummary {
      folder:    Folder::Category(Category::Work),
      total:     2,
      completed: 1
    });
  }

  #[test]
  fn parses_folder_names() {
    assert_eq!(
      "all".parse::<Folder>().expect("all"),
      Folder::All
    );
    assert_eq!(
      "Daily Goals"
        .parse::<Folder>()
        .expect("daily"),
      Folder::Category(Category::DailyGoals)
    );
  }
}
