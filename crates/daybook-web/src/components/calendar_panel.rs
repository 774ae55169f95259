use chrono::Datelike;
use daybook_core::Intent;
use daybook_core::calendar::{
  CalendarCell,
  MonthGrid
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CalendarPanelProps {
  pub grid:      MonthGrid,
  pub on_intent: Callback<Intent>
}

#[function_component(CalendarPanel)]
pub fn calendar_panel(
  props: &CalendarPanelProps
) -> Html {
  let nav = |delta: i32, label: &'static str| {
    let on_intent =
      props.on_intent.clone();
    html! {
        <button
            type="button"
            class="btn calendar-nav"
            onclick={Callback::from(move |_| on_intent.emit(Intent::NavigateMonth(delta)))}
        >
            { label }
        </button>
    }
  };

  html! {
      <div class="panel calendar">
          <div class="calendar-header">
              { nav(-1, "‹") }
              <div class="calendar-title">{ props.grid.title.clone() }</div>
              { nav(1, "›") }
          </div>
          <div class="calendar-weekday-row">
              {
                  for props.grid.weekday_labels.iter().map(|label| html! {
                      <div class="calendar-weekday">{ *label }</div>
                  })
              }
          </div>
          <div class="calendar-grid">
              {
                  for props.grid.cells.iter().copied().map(|cell| match cell {
                      | CalendarCell::Blank => html! {
                          <div class="calendar-day-cell blank"></div>
                      },
                      | CalendarCell::Day(day) => {
                          let on_intent = props.on_intent.clone();
                          let date = day.date;
                          html! {
                              <button
                                  type="button"
                                  class={classes!(
                                      "calendar-day-cell",
                                      day.is_today.then_some("today"),
                                      day.is_selected.then_some("selected")
                                  )}
                                  onclick={Callback::from(move |_| on_intent.emit(Intent::SelectDate(date)))}
                              >
                                  <div class="calendar-day-label">{ date.day() }</div>
                                  {
                                      if day.has_tasks {
                                          html! { <span class="calendar-dot"></span> }
                                      } else {
                                          html! {}
                                      }
                                  }
                              </button>
                          }
                      }
                  })
              }
          </div>
      </div>
  }
}
