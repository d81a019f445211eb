//! Teachers and TAs across the student's courses, deduplicated.

use std::collections::HashMap;

use crate::api::people::list_course_users;
use crate::client::CanvasClient;
use crate::error::Result;
use crate::types::User;

use super::fan_out::{fan_out_courses, CourseRef};
use super::students::active_course_refs;
use super::types::{PersonCourse, PersonItem};

/// List the teachers and TAs of the student's courses, one entry per
/// person, sorted by name.
///
/// A person teaching several courses appears once with every course
/// listed. Anyone holding a TA enrollment anywhere is labeled `TA`,
/// otherwise `Teacher`. Restricting to one course propagates the fetch
/// error instead of degrading, so an inaccessible course id surfaces as
/// not-found rather than an empty roster.
pub async fn course_people(
    client: &CanvasClient,
    course_id: Option<u64>,
) -> Result<Vec<PersonItem>> {
    let per_course: Vec<(CourseRef, Vec<User>)> = match course_id {
        Some(id) => {
            let course = crate::api::courses::require_course(client, id).await?;
            let course_ref = CourseRef::from(&course);
            let users = list_course_users(client, id, &["teacher", "ta"]).await?;
            vec![(course_ref, users)]
        }
        None => {
            let courses = active_course_refs(client).await?;
            let fan_out = fan_out_courses(&courses, |course| async move {
                let users = list_course_users(client, course.id, &["teacher", "ta"]).await?;
                Ok(vec![(course.clone(), users)])
            })
            .await;
            fan_out.into_data("people")
        }
    };

    Ok(merge_people(per_course))
}

fn merge_people(per_course: Vec<(CourseRef, Vec<User>)>) -> Vec<PersonItem> {
    struct Entry {
        person: PersonItem,
        is_ta: bool,
    }

    let mut order: Vec<u64> = Vec::new();
    let mut by_id: HashMap<u64, Entry> = HashMap::new();

    for (course, users) in per_course {
        for user in users {
            let is_ta = user
                .enrollments
                .as_ref()
                .map(|es| es.iter().any(|e| e.kind == "TaEnrollment"))
                .unwrap_or(false);

            let entry = by_id.entry(user.id).or_insert_with(|| {
                order.push(user.id);
                Entry {
                    person: PersonItem {
                        name: user.name.clone(),
                        role: String::new(),
                        email: user.email.clone(),
                        courses: Vec::new(),
                    },
                    is_ta: false,
                }
            });
            entry.is_ta |= is_ta;
            if entry.person.email.is_none() {
                entry.person.email = user.email;
            }
            entry.person.courses.push(PersonCourse {
                id: course.id,
                name: course.name.clone(),
            });
        }
    }

    let mut people: Vec<PersonItem> = order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .map(|mut entry| {
            entry.person.role = if entry.is_ta { "TA" } else { "Teacher" }.to_string();
            entry.person.courses.sort_by(|a, b| a.name.cmp(&b.name));
            entry.person.courses.dedup();
            entry.person
        })
        .collect();

    people.sort_by(|a, b| a.name.cmp(&b.name));
    people
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Enrollment;

    fn course(id: u64, name: &str) -> CourseRef {
        CourseRef {
            id,
            name: name.to_string(),
        }
    }

    fn user(id: u64, name: &str, kind: &str) -> User {
        User {
            id,
            name: name.to_string(),
            short_name: None,
            sortable_name: None,
            email: None,
            enrollments: Some(vec![Enrollment {
                kind: kind.to_string(),
                user_id: Some(id),
                grades: None,
            }]),
        }
    }

    #[test]
    fn person_in_two_courses_appears_once_with_both() {
        let people = merge_people(vec![
            (
                course(1, "Biology"),
                vec![user(7, "Pat Singh", "TeacherEnrollment")],
            ),
            (
                course(2, "Algebra"),
                vec![user(7, "Pat Singh", "TeacherEnrollment")],
            ),
        ]);

        assert_eq!(people.len(), 1);
        assert_eq!(people[0].role, "Teacher");
        let names: Vec<&str> = people[0].courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Algebra", "Biology"]);
    }

    #[test]
    fn any_ta_enrollment_wins_the_role() {
        let people = merge_people(vec![
            (
                course(1, "Biology"),
                vec![user(7, "Pat Singh", "TeacherEnrollment")],
            ),
            (
                course(2, "Algebra"),
                vec![user(7, "Pat Singh", "TaEnrollment")],
            ),
        ]);
        assert_eq!(people[0].role, "TA");
    }

    #[test]
    fn people_sort_by_name() {
        let people = merge_people(vec![(
            course(1, "Biology"),
            vec![
                user(2, "Zoe Park", "TeacherEnrollment"),
                user(1, "Ana Reyes", "TeacherEnrollment"),
            ],
        )]);
        let names: Vec<&str> = people.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Reyes", "Zoe Park"]);
    }
}
