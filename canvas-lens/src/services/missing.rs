//! Server-flagged missing assignments, and the reconciled
//! missing + unsubmitted view.
//!
//! Two independent signals exist for "assignment not done": the server's
//! own `missing` flag, and the client-side scan for past-due submissions
//! with no `submitted_at` (see [`super::unsubmitted`]). The sets overlap
//! but neither contains the other, so the combined view reconciles them
//! instead of concatenating.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::api::users::{get_missing_submissions, MissingSubmissionsOptions, UserRef};
use crate::client::CanvasClient;
use crate::error::Result;

use super::types::{
    MissingAssignment, MissingCountByCourse, MissingWorkItem, UnsubmittedAssignment, WorkSource,
};
use super::unsubmitted::{unsubmitted_assignments, UnsubmittedOptions};

/// Options shared by the missing-work queries.
#[derive(Debug, Default, Clone)]
pub struct MissingOptions {
    /// Restrict to one course
    pub course_id: Option<u64>,
    /// Include assignments from all grading periods instead of only the
    /// current one
    pub all_grading_periods: bool,
}

/// Get assignments the server has flagged missing for the student.
///
/// Defaults to the current grading period, matching what parents see in
/// the portal; `all_grading_periods` lifts the filter.
pub async fn missing_assignments(
    client: &CanvasClient,
    student: &UserRef,
    options: &MissingOptions,
) -> Result<Vec<MissingAssignment>> {
    let missing = get_missing_submissions(
        client,
        student,
        &MissingSubmissionsOptions {
            course_ids: options.course_id.into_iter().collect(),
            include_course: true,
            current_grading_period: !options.all_grading_periods,
        },
    )
    .await?;

    Ok(missing
        .into_iter()
        .map(|m| MissingAssignment {
            id: m.id,
            name: m.name,
            course_id: m.course_id,
            course_name: m
                .course
                .map(|c| c.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Course {}", m.course_id)),
            due_at: m.due_at,
            points_possible: m.points_possible,
            url: m.html_url.unwrap_or_default(),
        })
        .collect())
}

/// Summarize missing assignments as per-course counts.
pub async fn missing_counts_by_course(
    client: &CanvasClient,
    student: &UserRef,
    options: &MissingOptions,
) -> Result<Vec<MissingCountByCourse>> {
    let missing = missing_assignments(client, student, options).await?;

    let mut order: Vec<u64> = Vec::new();
    let mut counts: HashMap<u64, MissingCountByCourse> = HashMap::new();
    for m in missing {
        counts
            .entry(m.course_id)
            .or_insert_with(|| {
                order.push(m.course_id);
                MissingCountByCourse {
                    course_id: m.course_id,
                    course_name: m.course_name.clone(),
                    count: 0,
                }
            })
            .count += 1;
    }

    Ok(order.into_iter().filter_map(|id| counts.remove(&id)).collect())
}

/// Get the reconciled missing + unsubmitted view.
///
/// When `include_unsubmitted` is set, client-derived unsubmitted
/// past-due assignments are merged in, deduplicated by
/// `(course_id, assignment name)` — not by assignment id, since the
/// unsubmitted path does not always carry a trustworthy id — with the
/// server-flagged signal winning every collision. Sorted most recent due
/// date first.
pub async fn missing_work(
    client: &CanvasClient,
    student: &UserRef,
    options: &MissingOptions,
    include_unsubmitted: bool,
) -> Result<Vec<MissingWorkItem>> {
    let missing = missing_assignments(client, student, options).await?;
    let mut items: Vec<MissingWorkItem> = missing.into_iter().map(missing_row).collect();

    if include_unsubmitted {
        let unsubmitted = unsubmitted_assignments(
            client,
            student,
            &UnsubmittedOptions {
                course_id: options.course_id,
                all_grading_periods: options.all_grading_periods,
            },
        )
        .await?;
        merge_unsubmitted(&mut items, unsubmitted);
    }

    items.sort_by(|a, b| compare_due_desc(a.due_at, b.due_at));
    Ok(items)
}

fn missing_row(item: MissingAssignment) -> MissingWorkItem {
    MissingWorkItem {
        course_id: item.course_id,
        course_name: item.course_name,
        name: item.name,
        due_at: item.due_at,
        points_possible: item.points_possible,
        url: item.url,
        source: WorkSource::Missing,
    }
}

/// Merge unsubmitted rows into a missing-sourced list, dropping any
/// `(course_id, name)` pair already present. The missing-sourced entry
/// always survives, never the reverse.
fn merge_unsubmitted(items: &mut Vec<MissingWorkItem>, unsubmitted: Vec<UnsubmittedAssignment>) {
    let mut seen: HashSet<(u64, String)> = items
        .iter()
        .map(|i| (i.course_id, i.name.clone()))
        .collect();

    for item in unsubmitted {
        let key = (item.course_id, item.name.clone());
        if seen.insert(key) {
            items.push(MissingWorkItem {
                course_id: item.course_id,
                course_name: item.course_name,
                name: item.name,
                due_at: item.due_at,
                points_possible: item.points_possible,
                url: item.url.unwrap_or_default(),
                source: WorkSource::Unsubmitted,
            });
        }
    }
}

/// Most recent due date first; undated items sort last.
pub(crate) fn compare_due_desc(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::RoutedTransport;

    fn missing_item(course_id: u64, name: &str, due: Option<&str>) -> MissingWorkItem {
        MissingWorkItem {
            course_id,
            course_name: format!("Course {course_id}"),
            name: name.to_string(),
            due_at: due.map(|d| d.parse().unwrap()),
            points_possible: Some(10.0),
            url: String::new(),
            source: WorkSource::Missing,
        }
    }

    fn unsubmitted_item(course_id: u64, name: &str, due: Option<&str>) -> UnsubmittedAssignment {
        UnsubmittedAssignment {
            id: 0,
            name: name.to_string(),
            course_id,
            course_name: format!("Course {course_id}"),
            due_at: due.map(|d| d.parse().unwrap()),
            points_possible: Some(10.0),
            url: None,
        }
    }

    #[test]
    fn overlapping_pair_keeps_the_missing_sourced_entry() {
        let mut items = vec![missing_item(1, "Essay", Some("2024-01-10T00:00:00Z"))];
        merge_unsubmitted(
            &mut items,
            vec![
                unsubmitted_item(1, "Essay", Some("2024-01-10T00:00:00Z")),
                unsubmitted_item(2, "Lab 3", Some("2024-01-05T00:00:00Z")),
            ],
        );

        assert_eq!(items.len(), 2);
        let essay = items.iter().find(|i| i.name == "Essay").unwrap();
        assert_eq!(essay.source, WorkSource::Missing);
        let lab = items.iter().find(|i| i.name == "Lab 3").unwrap();
        assert_eq!(lab.source, WorkSource::Unsubmitted);
    }

    #[test]
    fn same_name_in_different_courses_is_not_a_collision() {
        let mut items = vec![missing_item(1, "Essay", None)];
        merge_unsubmitted(&mut items, vec![unsubmitted_item(2, "Essay", None)]);
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn combined_view_reconciles_canned_pages_end_to_end() {
        let client = RoutedTransport::new()
            .route(
                "/users/99/missing_submissions",
                r#"[{"id": 101, "name": "Essay", "course_id": 10,
                     "due_at": "2024-02-20T00:00:00Z", "points_possible": 20.0,
                     "course": {"id": 10, "name": "English"}}]"#,
            )
            .route(
                "/courses",
                r#"[{"id": 10, "name": "English"}, {"id": 20, "name": "Biology"}]"#,
            )
            .route("/courses/10/grading_periods", r#"{"grading_periods": []}"#)
            .route("/courses/20/grading_periods", r#"{"grading_periods": []}"#)
            .route(
                "/courses/10/students/submissions",
                r#"[{"assignment_id": 101, "assignment": {"id": 101, "name": "Essay",
                     "course_id": 10, "due_at": "2024-02-20T00:00:00Z"}}]"#,
            )
            .route(
                "/courses/20/students/submissions",
                r#"[{"assignment_id": 201, "assignment": {"id": 201, "name": "Lab 3",
                     "course_id": 20, "due_at": "2024-02-25T00:00:00Z"}}]"#,
            )
            .client();

        let items = missing_work(&client, &UserRef::Id(99), &MissingOptions::default(), true)
            .await
            .unwrap();

        // Essay shows up in both signals and keeps its server-flagged
        // identity; Lab 3 only exists client-side.
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Lab 3");
        assert_eq!(items[0].source, WorkSource::Unsubmitted);
        assert_eq!(items[0].course_name, "Biology");
        assert_eq!(items[1].name, "Essay");
        assert_eq!(items[1].source, WorkSource::Missing);
        assert_eq!(items[1].course_name, "English");
    }

    #[test]
    fn sorted_most_recent_due_first_with_undated_last() {
        let mut items = vec![
            missing_item(1, "old", Some("2024-01-05T00:00:00Z")),
            missing_item(1, "undated", None),
            missing_item(1, "new", Some("2024-01-10T00:00:00Z")),
        ];
        items.sort_by(|a, b| compare_due_desc(a.due_at, b.due_at));
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["new", "old", "undated"]);
    }
}
