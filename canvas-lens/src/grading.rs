//! Grading period resolution
//!
//! Canvas scopes the "current grade" widget parents see in the portal to
//! the current grading period, so grade and missing-work queries need to
//! know which period "now" falls in. The resolver is state-free: list the
//! course's periods, pick the one containing now, fall back to the most
//! recently started open period, and treat "no periods at all" as "apply
//! no period filter" — never as an error.

use chrono::{DateTime, Utc};

use crate::api::courses::list_grading_periods;
use crate::client::CanvasClient;
use crate::error::Result;
use crate::types::GradingPeriod;

/// Find the current grading period for a course.
///
/// Returns `None` when the course has no grading periods configured or
/// none is current; callers must treat that as "no period filter".
pub async fn current_grading_period(
    client: &CanvasClient,
    course_id: u64,
) -> Result<Option<GradingPeriod>> {
    let periods = list_grading_periods(client, course_id).await?;
    Ok(resolve_current(periods, Utc::now()))
}

/// Pick the grading period for `now` from a course's period list.
///
/// A period whose `[start_date, end_date]` range contains `now` wins.
/// Otherwise the open (not closed) period with the latest start date is
/// used — this covers the gap days between periods. Both bounds are
/// inclusive.
pub fn resolve_current(
    periods: Vec<GradingPeriod>,
    now: DateTime<Utc>,
) -> Option<GradingPeriod> {
    if periods.is_empty() {
        return None;
    }

    if let Some(current) = periods
        .iter()
        .find(|p| p.start_date <= now && now <= p.end_date)
    {
        return Some(current.clone());
    }

    periods
        .into_iter()
        .filter(|p| !p.is_closed)
        .max_by_key(|p| p.start_date)
}

/// Test whether a due date falls inside a grading period's date range.
///
/// Used to infer period membership when a submission carries no
/// `grading_period_id`. This is a heuristic, not an authoritative signal:
/// both bounds are inclusive, so an assignment due exactly on a period
/// boundary is counted in both adjacent periods.
pub fn due_falls_in_period(due_at: DateTime<Utc>, period: &GradingPeriod) -> bool {
    period.start_date <= due_at && due_at <= period.end_date
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn period(id: u64, start: &str, end: &str, closed: bool) -> GradingPeriod {
        GradingPeriod {
            id,
            title: format!("Period {id}"),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            is_closed: closed,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn picks_period_containing_now() {
        let periods = vec![
            period(1, "2024-01-01T00:00:00Z", "2024-03-15T23:59:59Z", true),
            period(2, "2024-03-16T00:00:00Z", "2024-06-01T23:59:59Z", false),
        ];
        let current = resolve_current(periods, at("2024-04-01T12:00:00Z")).unwrap();
        assert_eq!(current.id, 2);
    }

    #[test]
    fn containing_period_beats_most_recently_started() {
        // Period 2 started later, but now falls inside period 1 only.
        let periods = vec![
            period(1, "2024-01-01T00:00:00Z", "2024-03-15T23:59:59Z", false),
            period(2, "2024-05-01T00:00:00Z", "2024-06-01T23:59:59Z", false),
        ];
        let current = resolve_current(periods, at("2024-02-01T00:00:00Z")).unwrap();
        assert_eq!(current.id, 1);
    }

    #[test]
    fn falls_back_to_latest_open_period_between_periods() {
        let periods = vec![
            period(1, "2024-01-01T00:00:00Z", "2024-03-10T23:59:59Z", false),
            period(2, "2024-03-20T00:00:00Z", "2024-06-01T23:59:59Z", false),
        ];
        // Now is in the gap between the two periods; neither contains it,
        // but period 2 has the later start date.
        let current = resolve_current(periods, at("2024-03-15T00:00:00Z")).unwrap();
        assert_eq!(current.id, 2);
    }

    #[test]
    fn closed_periods_are_skipped_in_fallback() {
        let periods = vec![
            period(1, "2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z", false),
            period(2, "2024-02-02T00:00:00Z", "2024-03-01T00:00:00Z", true),
        ];
        let current = resolve_current(periods, at("2024-03-10T00:00:00Z")).unwrap();
        assert_eq!(current.id, 1);
    }

    #[test]
    fn no_periods_resolves_to_none() {
        assert!(resolve_current(Vec::new(), Utc::now()).is_none());
    }

    #[test]
    fn all_closed_and_none_containing_resolves_to_none() {
        let periods = vec![
            period(1, "2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z", true),
        ];
        assert!(resolve_current(periods, at("2024-03-01T00:00:00Z")).is_none());
    }

    #[test]
    fn period_bounds_are_inclusive_for_due_dates() {
        let p = period(1, "2024-01-01T00:00:00Z", "2024-03-15T00:00:00Z", false);
        assert!(due_falls_in_period(at("2024-01-01T00:00:00Z"), &p));
        assert!(due_falls_in_period(at("2024-03-15T00:00:00Z"), &p));
        assert!(!due_falls_in_period(at("2024-03-15T00:00:01Z"), &p));
    }

    #[test]
    fn now_exactly_on_boundary_is_inside() {
        let periods = vec![
            period(1, "2024-01-01T00:00:00Z", "2024-03-15T00:00:00Z", false),
        ];
        let current = resolve_current(periods, at("2024-03-15T00:00:00Z")).unwrap();
        assert_eq!(current.id, 1);
    }
}
