use std::collections::BTreeSet;

use chrono::{
  Datelike,
  Duration,
  NaiveDate,
  Weekday
};

/// The month shown by the calendar page.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct MonthCursor {
  year:  i32,
  month: u32
}

impl MonthCursor {
  #[must_use]
  pub fn containing(
    day: NaiveDate
  ) -> Self {
    Self {
      year:  day.year(),
      month: day.month()
    }
  }

  #[must_use]
  pub fn year(self) -> i32 {
    self.year
  }

  #[must_use]
  pub fn month(self) -> u32 {
    self.month
  }

  #[must_use]
  pub fn first_day(self) -> NaiveDate {
    first_day_of_month(
      self.year, self.month
    )
  }

  #[must_use]
  pub fn last_day(self) -> NaiveDate {
    let (next_year, next_month) =
      if self.month >= 12 {
        (self.year.saturating_add(1), 1_u32)
      } else {
        (self.year, self.month + 1)
      };
    add_days(
      first_day_of_month(
        next_year, next_month
      ),
      -1
    )
  }

  #[must_use]
  pub fn days_in_month(self) -> u32 {
    self.last_day().day()
  }

  #[must_use]
  pub fn contains(
    self,
    day: NaiveDate
  ) -> bool {
    day.year() == self.year
      && day.month() == self.month
  }

  #[must_use]
  pub fn shift(
    self,
    months: i32
  ) -> Self {
    let mut year = self.year;
    let mut month =
      self.month as i32 + months % 12;
    year = year.saturating_add(months / 12);

    if month < 1 {
      month += 12;
      year = year.saturating_sub(1);
    }
    if month > 12 {
      month -= 12;
      year = year.saturating_add(1);
    }

    Self {
      year,
      month: month as u32
    }
  }

  #[must_use]
  pub fn title(self) -> String {
    self
      .first_day()
      .format("%B %Y")
      .to_string()
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct DayCell {
  pub date:        NaiveDate,
  pub is_today:    bool,
  pub is_selected: bool,
  pub has_tasks:   bool
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CalendarCell {
  Blank,
  Day(DayCell)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
  pub cursor:         MonthCursor,
  pub title:          String,
  pub weekday_labels: Vec<&'static str>,
  pub cells:          Vec<CalendarCell>
}

/// Leading blanks up to the first day of
/// the month, then one cell per day.
#[must_use]
pub fn build_month_grid(
  cursor: MonthCursor,
  week_start: Weekday,
  today: NaiveDate,
  selected: NaiveDate,
  marked: &BTreeSet<NaiveDate>
) -> MonthGrid {
  let first = cursor.first_day();
  let lead = leading_blanks(first, week_start);

  let mut cells = Vec::with_capacity(
    lead + cursor.days_in_month() as usize
  );
  cells.extend(
    std::iter::repeat_n(
      CalendarCell::Blank,
      lead
    )
  );
  cells.extend(
    first
      .iter_days()
      .take_while(|day| {
        cursor.contains(*day)
      })
      .map(|date| {
        CalendarCell::Day(DayCell {
          date,
          is_today: date == today,
          is_selected: date == selected,
          has_tasks: marked.contains(&date)
        })
      })
  );

  MonthGrid {
    cursor,
    title: cursor.title(),
    weekday_labels: weekday_labels(
      week_start
    ),
    cells
  }
}

#[must_use]
pub fn weekday_labels(
  week_start: Weekday
) -> Vec<&'static str> {
  let mut day = week_start;
  let mut labels = Vec::with_capacity(7);
  for _ in 0..7 {
    labels.push(match day {
      | Weekday::Mon => "Mon",
      | Weekday::Tue => "Tue",
      | Weekday::Wed => "Wed",
      | Weekday::Thu => "Thu",
      | Weekday::Fri => "Fri",
      | Weekday::Sat => "Sat",
      | Weekday::Sun => "Sun"
    });
    day = day.succ();
  }
  labels
}

fn leading_blanks(
  first: NaiveDate,
  week_start: Weekday
) -> usize {
  let day_idx = first
    .weekday()
    .num_days_from_monday();
  let start_idx =
    week_start.num_days_from_monday();
  ((7 + day_idx - start_idx) % 7) as usize
}

fn first_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(
    year, month, 1
  )
  .unwrap_or(NaiveDate::MIN)
}

fn add_days(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  date
    .checked_add_signed(Duration::days(
      days
    ))
    .unwrap_or(date)
}
