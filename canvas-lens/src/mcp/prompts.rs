//! Built-in MCP prompts
//!
//! Each prompt is a canned multi-step workflow: a user message that walks
//! an assistant through a sequence of tool calls and tells it what to
//! summarize. The set is fixed at compile time, unlike the tool registry.

use std::collections::HashMap;

use rmcp::model::{
    GetPromptResult, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
    PromptMessageRole,
};
use rmcp::Error as McpError;

/// Declared argument of a built-in prompt.
struct ArgumentSpec {
    name: &'static str,
    description: &'static str,
    required: bool,
}

/// One built-in prompt: listing metadata plus a renderer over the
/// client-supplied arguments.
struct PromptDefinition {
    name: &'static str,
    description: &'static str,
    arguments: &'static [ArgumentSpec],
    render: fn(&HashMap<String, String>) -> String,
}

/// The built-in prompts, in listing order.
pub struct PromptRegistry {
    prompts: Vec<PromptDefinition>,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self {
            prompts: vec![
                PromptDefinition {
                    name: "daily-checkin",
                    description: "Get a quick daily overview of grades, missing work, upcoming \
                                  assignments, and teacher announcements",
                    arguments: &[ArgumentSpec {
                        name: "student_id",
                        description: "Student ID",
                        required: true,
                    }],
                    render: daily_checkin,
                },
                PromptDefinition {
                    name: "week-planning",
                    description: "Plan the upcoming week with assignment priorities and daily \
                                  breakdown",
                    arguments: &[
                        ArgumentSpec {
                            name: "student_id",
                            description: "Student ID",
                            required: true,
                        },
                        ArgumentSpec {
                            name: "days",
                            description: "Days to look ahead (default: 7)",
                            required: false,
                        },
                    ],
                    render: week_planning,
                },
                PromptDefinition {
                    name: "course-analysis",
                    description: "Detailed analysis of a specific course - grades, missing work, \
                                  and patterns",
                    arguments: &[
                        ArgumentSpec {
                            name: "student_id",
                            description: "Student ID",
                            required: true,
                        },
                        ArgumentSpec {
                            name: "course_id",
                            description: "Course ID to analyze",
                            required: true,
                        },
                    ],
                    render: course_analysis,
                },
                PromptDefinition {
                    name: "grade-recovery",
                    description: "Identify opportunities to improve grades across all courses",
                    arguments: &[ArgumentSpec {
                        name: "student_id",
                        description: "Student ID",
                        required: true,
                    }],
                    render: grade_recovery,
                },
                PromptDefinition {
                    name: "missing-work-audit",
                    description: "Comprehensive audit of all missing and late work",
                    arguments: &[ArgumentSpec {
                        name: "student_id",
                        description: "Student ID",
                        required: true,
                    }],
                    render: missing_work_audit,
                },
            ],
        }
    }

    /// All prompts in listing form.
    pub fn list(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|p| Prompt {
                name: p.name.to_string(),
                description: Some(p.description.to_string()),
                arguments: convert_arguments(p.arguments),
            })
            .collect()
    }

    /// Render a prompt with the given arguments.
    ///
    /// Unknown names and missing required arguments come back as MCP
    /// protocol errors, matching how the tool side reports bad requests.
    pub fn render(
        &self,
        name: &str,
        arguments: &HashMap<String, String>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        let Some(prompt) = self.prompts.iter().find(|p| p.name == name) else {
            return Err(McpError::invalid_request(
                format!("Unknown prompt: {name}"),
                None,
            ));
        };

        for spec in prompt.arguments {
            if spec.required && !arguments.contains_key(spec.name) {
                return Err(McpError::invalid_params(
                    format!("Prompt '{name}' requires argument '{}'", spec.name),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(prompt.description.to_string()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::Text {
                    text: (prompt.render)(arguments),
                },
            }],
        })
    }
}

fn convert_arguments(specs: &[ArgumentSpec]) -> Option<Vec<PromptArgument>> {
    if specs.is_empty() {
        None
    } else {
        Some(
            specs
                .iter()
                .map(|spec| PromptArgument {
                    name: spec.name.to_string(),
                    description: Some(spec.description.to_string()),
                    required: Some(spec.required),
                })
                .collect(),
        )
    }
}

/// Required arguments are validated before rendering, so a miss here can
/// only be an optional argument.
fn arg<'a>(arguments: &'a HashMap<String, String>, name: &str) -> &'a str {
    arguments.get(name).map(String::as_str).unwrap_or_default()
}

fn daily_checkin(arguments: &HashMap<String, String>) -> String {
    let student = arg(arguments, "student_id");
    format!(
        "Please give me a daily check-in for student {student}:

1. First, get their current grades across all courses using get_courses
2. Then check for any missing assignments using get_missing_assignments
3. Check for unsubmitted past-due work using get_unsubmitted_past_due
4. Show what's due in the next 7 days using get_due_this_week
5. Check for recent teacher announcements using get_announcements (days=3)

Summarize with:
- Overall grade status (any concerns?)
- Missing/late work that needs immediate attention
- What's coming up this week
- Recent teacher announcements or communications
- A prioritized action list if there are issues to address"
    )
}

fn week_planning(arguments: &HashMap<String, String>) -> String {
    let student = arg(arguments, "student_id");
    let days = arguments
        .get("days")
        .map(String::as_str)
        .filter(|d| !d.is_empty())
        .unwrap_or("7");
    format!(
        "Help me plan the week for student {student}:

1. Get assignments due in the next {days} days using get_due_this_week
2. Check the to-do list using get_todo
3. Look for any missing work that should be prioritized using get_missing_assignments

Create a day-by-day plan that:
- Prioritizes past-due work first (these should be done ASAP)
- Spreads out upcoming assignments reasonably
- Flags any heavy days with multiple deadlines
- Suggests what to work on each day
- Notes any assignments worth a lot of points"
    )
}

fn course_analysis(arguments: &HashMap<String, String>) -> String {
    let student = arg(arguments, "student_id");
    let course = arg(arguments, "course_id");
    format!(
        "Analyze course {course} in detail for student {student}:

1. Get the current grade using get_courses
2. List all assignments using list_assignments with the course_id
3. Check for missing work in this course using get_missing_assignments with course_id filter
4. Get upcoming assignments using get_upcoming_assignments

Provide:
- Current grade and standing in the class
- Assignment completion rate (submitted vs total)
- Any patterns (consistently late? missing certain types of work?)
- Impact of missing assignments on the grade
- What would improve the grade most (quick wins)
- Upcoming work to watch out for"
    )
}

fn grade_recovery(arguments: &HashMap<String, String>) -> String {
    let student = arg(arguments, "student_id");
    format!(
        "Help identify grade recovery opportunities for student {student}:

1. Get current grades using get_courses
2. Get statistics on late/missing work using get_stats
3. Find all missing assignments using get_missing_assignments

For each course, especially those below a B:
- Calculate the impact of missing assignments on the grade
- Identify which missing work could potentially still be submitted
- Prioritize by: points possible, likelihood of acceptance, and effort required
- Estimate potential grade improvement if completed

Create an action plan:
- Quick wins (high points, low effort)
- Important recovery items (high impact on grade)
- Long shots (may not be accepted but worth asking)"
    )
}

fn missing_work_audit(arguments: &HashMap<String, String>) -> String {
    let student = arg(arguments, "student_id");
    format!(
        "Perform a comprehensive audit of missing work for student {student}:

1. Get all Canvas-flagged missing assignments using get_missing_assignments
2. Get unsubmitted past-due work using get_unsubmitted_past_due (catches items Canvas missed)
3. Get late/missing statistics by course using get_stats

Create a report showing:
- Total missing assignments across all courses
- Breakdown by course (which classes have the most issues?)
- Oldest missing assignments (how far back does this go?)
- Total points at risk
- Courses with the highest missing percentage

Flag any concerning patterns:
- Specific courses with many missing items
- Recent spike in missing work
- High-point assignments that are missing"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn message_text(result: &GetPromptResult) -> &str {
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn all_five_prompts_are_listed_with_arguments() {
        let listed = PromptRegistry::new().list();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "daily-checkin",
                "week-planning",
                "course-analysis",
                "grade-recovery",
                "missing-work-audit",
            ]
        );

        for prompt in &listed {
            let arguments = prompt.arguments.as_ref().unwrap();
            let student = arguments.iter().find(|a| a.name == "student_id").unwrap();
            assert_eq!(student.required, Some(true));
        }
    }

    #[test]
    fn rendered_prompt_names_the_student_and_the_tools() {
        let registry = PromptRegistry::new();
        let result = registry
            .render("daily-checkin", &args(&[("student_id", "42")]))
            .unwrap();
        let text = message_text(&result);
        assert!(text.contains("student 42"));
        assert!(text.contains("get_missing_assignments"));
        assert!(text.contains("get_due_this_week"));
    }

    #[test]
    fn week_planning_days_defaults_to_seven() {
        let registry = PromptRegistry::new();

        let result = registry
            .render("week-planning", &args(&[("student_id", "42")]))
            .unwrap();
        assert!(message_text(&result).contains("next 7 days"));

        let result = registry
            .render(
                "week-planning",
                &args(&[("student_id", "42"), ("days", "14")]),
            )
            .unwrap();
        assert!(message_text(&result).contains("next 14 days"));
    }

    #[test]
    fn course_analysis_requires_both_ids() {
        let registry = PromptRegistry::new();
        let err = registry
            .render("course-analysis", &args(&[("student_id", "42")]))
            .unwrap_err();
        assert!(err.message.contains("course_id"));

        let result = registry
            .render(
                "course-analysis",
                &args(&[("student_id", "42"), ("course_id", "10")]),
            )
            .unwrap();
        assert!(message_text(&result).contains("course 10"));
    }

    #[test]
    fn unknown_prompt_is_rejected() {
        let registry = PromptRegistry::new();
        let err = registry.render("pep-talk", &HashMap::new()).unwrap_err();
        assert!(err.message.contains("pep-talk"));
    }

    #[test]
    fn missing_student_id_is_rejected_everywhere() {
        let registry = PromptRegistry::new();
        for name in [
            "daily-checkin",
            "week-planning",
            "course-analysis",
            "grade-recovery",
            "missing-work-audit",
        ] {
            let err = registry.render(name, &HashMap::new()).unwrap_err();
            assert!(err.message.contains("student_id"), "{name}");
        }
    }
}
