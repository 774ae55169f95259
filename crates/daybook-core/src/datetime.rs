use anyhow::{
  Context,
  anyhow
};
use chrono::{
  Local,
  NaiveDate,
  NaiveTime,
  Timelike
};

const DUE_DATE_FORMAT: &str =
  "%Y-%m-%d";
const CLOCK_FORMAT: &str = "%H:%M";
const CLOCK_FORMAT_SECONDS: &str =
  "%H:%M:%S";

pub const ALL_DAY_LABEL: &str =
  "All Day";

/// Where a due date sits relative to
/// today, at day granularity.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct DateStatus {
  pub is_overdue:   bool,
  pub is_due_today: bool
}

#[must_use]
pub fn date_status(
  due: Option<NaiveDate>,
  today: NaiveDate
) -> DateStatus {
  match due {
    | Some(day) => {
      DateStatus {
        is_overdue:   day < today,
        is_due_today: day == today
      }
    }
    | None => DateStatus::default()
  }
}

/// The current date in the local
/// calendar. Callers take it once per
/// render and pass it down.
#[must_use]
pub fn today_local() -> NaiveDate {
  Local::now().date_naive()
}

pub fn parse_due_date(
  raw: &str
) -> anyhow::Result<Option<NaiveDate>> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }

  NaiveDate::parse_from_str(
    trimmed,
    DUE_DATE_FORMAT
  )
  .map(Some)
  .with_context(|| {
    format!(
      "invalid due date: {trimmed}"
    )
  })
}

/// Accepts `HH:MM` or `HH:MM:SS`.
/// Seconds are dropped so the value
/// matches the stored `HH:MM` form.
pub fn parse_clock_time(
  raw: &str
) -> anyhow::Result<Option<NaiveTime>> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }

  NaiveTime::parse_from_str(
    trimmed,
    CLOCK_FORMAT
  )
  .or_else(|_| {
    NaiveTime::parse_from_str(
      trimmed,
      CLOCK_FORMAT_SECONDS
    )
  })
  .map(|time| {
    time
      .with_second(0)
      .and_then(|time| {
        time.with_nanosecond(0)
      })
  })
  .map_err(|err| {
    anyhow!(
      "invalid time {trimmed}: {err}"
    )
  })
}

#[must_use]
pub fn format_iso_date(
  day: NaiveDate
) -> String {
  day.format(DUE_DATE_FORMAT).to_string()
}

/// Display form of a due date. Shares
/// the date-only value used for status
/// checks, so the two never disagree.
#[must_use]
pub fn format_due_date(
  day: NaiveDate
) -> String {
  day.format("%a, %b %-d, %Y").to_string()
}

#[must_use]
pub fn format_clock(
  time: NaiveTime
) -> String {
  time.format("%-I:%M %p").to_string()
}

/// `"14:30"` becomes `"2:30 PM"`. Blank
/// or unreadable input yields an empty
/// string.
#[must_use]
pub fn format_time(raw: &str) -> String {
  match parse_clock_time(raw) {
    | Ok(Some(time)) => {
      format_clock(time)
    }
    | Ok(None) => String::new(),
    | Err(err) => {
      tracing::debug!(
        error = %err,
        "unreadable clock time"
      );
      String::new()
    }
  }
}

#[must_use]
pub fn time_window_label(
  start: Option<NaiveTime>,
  end: Option<NaiveTime>
) -> String {
  match (start, end) {
    | (Some(start), Some(end)) => {
      format!(
        "{} - {}",
        format_clock(start),
        format_clock(end)
      )
    }
    | (Some(only), None)
    | (None, Some(only)) => {
      format_clock(only)
    }
    | (None, None) => {
      ALL_DAY_LABEL.to_string()
    }
  }
}

pub mod due_date_serde {
  use chrono::NaiveDate;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  pub fn serialize<S>(
    day: &Option<NaiveDate>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    match day {
      | Some(value) => {
        serializer.serialize_str(
          &super::format_iso_date(
            *value
          )
        )
      }
      | None => {
        serializer.serialize_str("")
      }
    }
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Option<NaiveDate>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      Option::<String>::deserialize(
        deserializer
      )?;
    match raw {
      | Some(raw) => {
        super::parse_due_date(&raw)
          .map_err(
            serde::de::Error::custom
          )
      }
      | None => Ok(None)
    }
  }
}

pub mod clock_time_serde {
  use chrono::NaiveTime;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  pub fn serialize<S>(
    time: &Option<NaiveTime>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    match time {
      | Some(value) => {
        serializer.serialize_str(
          &value
            .format(super::CLOCK_FORMAT)
            .to_string()
        )
      }
      | None => {
        serializer.serialize_str("")
      }
    }
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Option<NaiveTime>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      Option::<String>::deserialize(
        deserializer
      )?;
    match raw {
      | Some(raw) => {
        super::parse_clock_time(&raw)
          .map_err(
            serde::de::Error::custom
          )
      }
      | None => Ok(None)
    }
  }
}
