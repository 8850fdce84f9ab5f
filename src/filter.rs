//! Derived views over the task list.
//!
//! Every view is a single predicate over the master list; results borrow the
//! tasks and keep insertion order. Views never combine predicates.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::fields::{ViewMode, WeekStart};
use crate::task::Task;

/// Parse a due date, ignoring any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to local time first)
/// and `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_due_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// First and last day of the week containing `today`.
pub fn week_bounds(today: NaiveDate, week_start: WeekStart) -> (NaiveDate, NaiveDate) {
    let offset = match week_start {
        WeekStart::Monday => today.weekday().num_days_from_monday(),
        WeekStart::Sunday => today.weekday().num_days_from_sunday(),
    } as i64;
    let start = today - Duration::days(offset);
    let end = start + Duration::days(6);
    (start, end)
}

/// Select the tasks belonging to `mode`.
///
/// `project` is only consulted in `ViewMode::Project`; it is compared with
/// `task.project` as-is, so `None` selects tasks without a project.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    mode: ViewMode,
    project: Option<&str>,
    today: NaiveDate,
    week_start: WeekStart,
) -> Vec<&'a Task> {
    let (week_start_day, week_end_day) = week_bounds(today, week_start);
    tasks
        .iter()
        .filter(|t| match mode {
            ViewMode::Today => parse_due_date(&t.due_date) == Some(today),
            ViewMode::ThisWeek => parse_due_date(&t.due_date)
                .map_or(false, |d| d >= week_start_day && d <= week_end_day),
            ViewMode::Project => t.project.as_deref() == project,
            ViewMode::Inbox => t.in_inbox(),
        })
        .collect()
}
