use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{
  NaiveDate,
  NaiveTime
};
use serde::{
  Deserialize,
  Serialize
};

use crate::datetime::{
  DateStatus,
  clock_time_serde,
  date_status,
  due_date_serde
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High
}

impl Priority {
  pub const ALL: [Priority; 3] = [
    Priority::High,
    Priority::Medium,
    Priority::Low
  ];

  /// Sort rank used by today's schedule;
  /// lower ranks come first.
  #[must_use]
  pub fn rank(self) -> u8 {
    match self {
      | Priority::High => 1,
      | Priority::Medium => 2,
      | Priority::Low => 3
    }
  }

  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | Priority::Low => "Low",
      | Priority::Medium => "Medium",
      | Priority::High => "High"
    }
  }
}

impl FromStr for Priority {
  type Err = anyhow::Error;

  fn from_str(
    raw: &str
  ) -> Result<Self, Self::Err> {
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "low" => Ok(Priority::Low),
      | "medium" => Ok(Priority::Medium),
      | "high" => Ok(Priority::High),
      | other => {
        Err(anyhow!(
          "unknown priority: {other}"
        ))
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
pub enum Category {
  #[default]
  Personal,
  Work,
  #[serde(rename = "Daily Goals")]
  DailyGoals,
  #[serde(rename = "Weekly Goals")]
  WeeklyGoals,
  #[serde(rename = "Monthly Goals")]
  MonthlyGoals
}

impl Category {
  pub const ALL: [Category; 5] = [
    Category::Personal,
    Category::Work,
    Category::DailyGoals,
    Category::WeeklyGoals,
    Category::MonthlyGoals
  ];

  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | Category::Personal => "Personal",
      | Category::Work => "Work",
      | Category::DailyGoals => {
        "Daily Goals"
      }
      | Category::WeeklyGoals => {
        "Weekly Goals"
      }
      | Category::MonthlyGoals => {
        "Monthly Goals"
      }
    }
  }
}

impl FromStr for Category {
  type Err = anyhow::Error;

  fn from_str(
    raw: &str
  ) -> Result<Self, Self::Err> {
    let wanted = raw.trim();
    Category::ALL
      .into_iter()
      .find(|category| {
        category
          .label()
          .eq_ignore_ascii_case(wanted)
      })
      .ok_or_else(|| {
        anyhow!(
          "unknown category: {wanted}"
        )
      })
  }
}

/// Validated fields for a task that does
/// not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
  pub text:       String,
  pub priority:   Priority,
  pub category:   Category,
  pub due_date:   Option<NaiveDate>,
  pub start_time: Option<NaiveTime>,
  pub end_time:   Option<NaiveTime>
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:         TaskId,
  pub text:       String,
  #[serde(default)]
  pub priority:   Priority,
  #[serde(default)]
  pub category:   Category,
  #[serde(
    default,
    with = "due_date_serde"
  )]
  pub due_date:   Option<NaiveDate>,
  #[serde(
    default,
    with = "clock_time_serde"
  )]
  pub start_time: Option<NaiveTime>,
  #[serde(
    default,
    with = "clock_time_serde"
  )]
  pub end_time:   Option<NaiveTime>,
  #[serde(default)]
  pub completed:  bool
}

impl Task {
  #[must_use]
  pub fn create(
    id: TaskId,
    new: NewTask
  ) -> Self {
    Self {
      id,
      text: new.text,
      priority: new.priority,
      category: new.category,
      due_date: new.due_date,
      start_time: new.start_time,
      end_time: new.end_time,
      completed: false
    }
  }

  #[must_use]
  pub fn is_due_on(
    &self,
    day: NaiveDate
  ) -> bool {
    self.due_date == Some(day)
  }

  #[must_use]
  pub fn status(
    &self,
    today: NaiveDate
  ) -> DateStatus {
    date_status(self.due_date, today)
  }
}
