// Session aggregation.
//
// Purpose
// - Turn the recent session log and the task list into the numbers shown on
//   the dashboard and the weekly report.
//
// Responsibilities
// - Bucket session minutes into the 7 local calendar days ending today.
// - Count tasks completed inside the same window.
// - Derive goal progress, clamped to 100 and safe against a zero goal.
//
// Everything here is pure. Callers re-run it whenever the inputs change.

use crate::modules::sessions::core::goals::Goals;
use crate::modules::sessions::core::session::SessionRecord;
use crate::modules::tasks::core::task::TaskRecord;
use crate::shared::core::primitives::EpochMillis;
use chrono::{DateTime, Days, NaiveDate, TimeZone};
use serde::Serialize;

pub const WINDOW_DAYS: u64 = 7;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: String,
    /// Short weekday name, e.g. "Mon".
    pub weekday: String,
    pub minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyStats {
    /// Oldest first, always `WINDOW_DAYS` long.
    pub days: Vec<DayBucket>,
    pub weekly_minutes: u64,
    pub today_minutes: u64,
    pub today_weekday: String,
    pub tasks_completed_this_week: u64,
    pub weekly_progress: f64,
    pub daily_progress: f64,
    pub weekly_goal: u32,
    pub daily_goal: u32,
    /// Totals over every loaded record, inside the window or not.
    pub loaded_minutes: u64,
    pub loaded_sessions: u64,
    pub window_start: String,
    pub window_end: String,
}

/// Percentage of `goal` reached, between 0 and 100. A zero goal yields 0.
pub fn progress(total: u64, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (total as f64 / f64::from(goal) * 100.0).min(100.0)
}

fn local_date<Tz: TimeZone>(timezone: &Tz, millis: EpochMillis) -> Option<NaiveDate> {
    timezone
        .timestamp_millis_opt(millis)
        .single()
        .map(|instant| instant.date_naive())
}

pub fn compute_study_stats<Tz: TimeZone>(
    sessions: &[SessionRecord],
    tasks: &[TaskRecord],
    goals: Goals,
    now: &DateTime<Tz>,
) -> StudyStats {
    let timezone = now.timezone();
    let today = now.date_naive();
    let window: Vec<NaiveDate> = (0..WINDOW_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect();
    let window_start = window.first().copied().unwrap_or(today);

    let mut minutes_by_day = vec![0u64; window.len()];
    let mut weekly_minutes = 0;
    let mut today_minutes = 0;
    let mut loaded_minutes = 0;

    for session in sessions {
        let minutes = u64::from(session.minutes);
        loaded_minutes += minutes;

        let Some(date) = session
            .created_at
            .and_then(|millis| local_date(&timezone, millis))
        else {
            continue;
        };
        let Some(index) = window.iter().position(|day| *day == date) else {
            continue;
        };
        minutes_by_day[index] += minutes;
        weekly_minutes += minutes;
        if date == today {
            today_minutes += minutes;
        }
    }

    // Same as "completed at or after local midnight of the window start".
    let tasks_completed_this_week = tasks
        .iter()
        .filter(|task| task.done)
        .filter_map(|task| task.completed_at)
        .filter_map(|millis| local_date(&timezone, millis))
        .filter(|date| *date >= window_start)
        .count() as u64;

    let days = window
        .iter()
        .zip(minutes_by_day)
        .map(|(date, minutes)| DayBucket {
            date: date.format(DATE_KEY_FORMAT).to_string(),
            weekday: date.format("%a").to_string(),
            minutes,
        })
        .collect();

    StudyStats {
        days,
        weekly_minutes,
        today_minutes,
        today_weekday: today.format("%A").to_string(),
        tasks_completed_this_week,
        weekly_progress: progress(weekly_minutes, goals.weekly_minutes),
        daily_progress: progress(today_minutes, goals.daily_minutes),
        weekly_goal: goals.weekly_minutes,
        daily_goal: goals.daily_minutes,
        loaded_minutes,
        loaded_sessions: sessions.len() as u64,
        window_start: window_start.format(DATE_KEY_FORMAT).to_string(),
        window_end: today.format(DATE_KEY_FORMAT).to_string(),
    }
}
