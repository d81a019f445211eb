//! Per-course late/missing statistics.

use std::collections::HashMap;

use crate::api::submissions::{list_submissions, SubmissionOptions};
use crate::api::users::{get_missing_submissions, resolve_user_id, MissingSubmissionsOptions, UserRef};
use crate::client::CanvasClient;
use crate::error::Result;

use super::fan_out::{fan_out_courses, CourseRef};
use super::students::active_course_refs;
use super::types::CourseStats;

/// Options for [`course_stats`].
#[derive(Debug, Clone)]
pub struct StatsOptions {
    /// Drop courses with no countable submissions
    pub hide_empty: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self { hide_empty: true }
    }
}

/// Compute late/missing statistics per active course, worst first.
///
/// `total` and `late` come from scanning the student's submissions;
/// `missing` comes from the server's own missing-submissions signal,
/// across all grading periods so the rates reflect the whole year.
/// Courses are sorted by missing percentage, then late percentage,
/// descending. Courses with nothing countable are hidden by default.
pub async fn course_stats(
    client: &CanvasClient,
    student: &UserRef,
    options: &StatsOptions,
) -> Result<Vec<CourseStats>> {
    let student_id = resolve_user_id(client, student).await?;
    let courses = active_course_refs(client).await?;

    let missing =
        get_missing_submissions(client, student, &MissingSubmissionsOptions::default()).await?;
    let mut missing_by_course: HashMap<u64, usize> = HashMap::new();
    for item in &missing {
        *missing_by_course.entry(item.course_id).or_insert(0) += 1;
    }

    let fan_out = fan_out_courses(&courses, |course| {
        let missing = missing_by_course.get(&course.id).copied().unwrap_or(0);
        async move {
            let submissions = list_submissions(
                client,
                &SubmissionOptions::for_student(course.id, student_id),
            )
            .await?;

            let counted: Vec<_> = submissions
                .iter()
                .filter(|s| s.assignment.is_some())
                .collect();
            let late = counted.iter().filter(|s| s.late).count();
            Ok(vec![build_stats(course, counted.len(), late, missing)])
        }
    })
    .await;

    let mut stats = fan_out.into_data("stats");
    if options.hide_empty {
        stats.retain(|s| s.total > 0);
    }
    stats.sort_by(|a, b| {
        b.missing_pct
            .partial_cmp(&a.missing_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.late_pct
                    .partial_cmp(&a.late_pct)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
    Ok(stats)
}

fn build_stats(course: &CourseRef, total: usize, late: usize, missing: usize) -> CourseStats {
    CourseStats {
        course_id: course.id,
        course_name: course.name.clone(),
        total,
        late,
        missing,
        late_pct: pct(late, total),
        missing_pct: pct(missing, total),
    }
}

/// Percentage with one decimal place; 0 when the denominator is 0.
pub(crate) fn pct(n: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (n as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_is_one_decimal_and_zero_safe() {
        assert_eq!(pct(1, 3), 33.3);
        assert_eq!(pct(2, 3), 66.7);
        assert_eq!(pct(0, 5), 0.0);
        assert_eq!(pct(0, 0), 0.0);
        assert_eq!(pct(3, 0), 0.0);
        assert_eq!(pct(5, 5), 100.0);
    }

    #[test]
    fn empty_courses_are_hidden_by_default() {
        assert!(StatsOptions::default().hide_empty);

        let mut stats = vec![
            build_stats(&CourseRef { id: 1, name: "Algebra".to_string() }, 12, 3, 2),
            build_stats(&CourseRef { id: 2, name: "Advisory".to_string() }, 0, 0, 0),
        ];
        stats.retain(|s| s.total > 0);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].course_name, "Algebra");
    }

    #[test]
    fn stats_rows_carry_both_percentages() {
        let course = CourseRef {
            id: 1,
            name: "Algebra".to_string(),
        };
        let stats = build_stats(&course, 12, 3, 2);
        assert_eq!(stats.late_pct, 25.0);
        assert_eq!(stats.missing_pct, 16.7);
    }
}
