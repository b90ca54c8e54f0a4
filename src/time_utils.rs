// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{
    DateTime, Datelike, Days, Local, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Monday 00:00 of the week containing `date`. Weeks run Monday to Sunday.
pub fn start_of_week(date: NaiveDateTime) -> NaiveDateTime {
    let days_back = u64::from(date.weekday().num_days_from_monday());
    let monday = date
        .date()
        .checked_sub_days(Days::new(days_back))
        .unwrap_or(date.date());
    monday.and_time(NaiveTime::MIN)
}

/// Start of the current week in the server's local timezone.
pub fn current_week_start() -> NaiveDateTime {
    start_of_week(Local::now().naive_local())
}

/// Resolve a local wall-clock time to an instant.
///
/// Returns `None` only when the local time does not exist (DST gap).
pub fn local_to_utc(local: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
