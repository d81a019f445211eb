use clap::{Parser, Subcommand, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "canvas-lens")]
#[command(version)]
#[command(about = "Read-only Canvas LMS client for parents and students")]
#[command(long_about = "
canvas-lens aggregates a student's Canvas LMS data across all their
courses: grades scoped to the current grading period, missing and
unsubmitted work, upcoming assignments, teacher feedback, announcements,
and more. It can also run as an MCP server over stdio or as a local
HTTP/JSON API.

Configuration comes from the environment (or a .env file):
  CANVAS_BASE_URL    e.g. https://school.instructure.com
  CANVAS_API_TOKEN   a Canvas API access token
  CANVAS_STUDENT_ID  optional default student id for observer accounts

Example usage:
  canvas-lens courses                 # courses with current grades
  canvas-lens missing --summary       # missing counts per course
  canvas-lens status --all-students   # overview for every observee
  canvas-lens serve                   # run as MCP server
  canvas-lens api --port 3000         # run the HTTP API
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Student to query: a Canvas user id, or "self"
    #[arg(long, global = true)]
    pub student: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List active courses with current grades
    Courses,
    /// List missing assignments
    Missing {
        /// Show per-course counts instead of individual assignments
        #[arg(long)]
        summary: bool,
        /// Also include unsubmitted past-due assignments the server
        /// has not flagged
        #[arg(long)]
        include_unsubmitted: bool,
        /// Include all grading periods instead of only the current one
        #[arg(long)]
        all_grading_periods: bool,
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// List past-due assignments with nothing submitted
    Unsubmitted {
        /// Include all grading periods instead of only the current one
        #[arg(long)]
        all_grading_periods: bool,
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// List assignments in one or all courses
    Assignments {
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
        /// Server-side bucket: past, overdue, undated, ungraded,
        /// unsubmitted, upcoming, future
        #[arg(long)]
        bucket: Option<String>,
        /// Keep only assignments due in the next seven days
        #[arg(long)]
        due_this_week: bool,
        /// Filter assignments by name
        #[arg(long)]
        search: Option<String>,
    },
    /// List recently graded work
    Grades {
        /// Look-back window in days
        #[arg(long, default_value_t = 14)]
        days: i64,
        /// Only grades strictly below this percentage
        #[arg(long)]
        below: Option<f64>,
    },
    /// List assignments due in the coming days
    Due {
        /// Window length in days
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Drop assignments that already have a score
        #[arg(long)]
        hide_graded: bool,
    },
    /// List each course's upcoming assignments
    Upcoming {
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// List planner to-do items for the coming days
    Todo {
        /// Window length in days
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Drop items already submitted
        #[arg(long)]
        hide_submitted: bool,
    },
    /// Late/missing statistics per course
    Stats {
        /// Keep courses with no countable submissions, hidden by default
        #[arg(long)]
        include_empty: bool,
    },
    /// Full academic status overview
    Status {
        /// One overview per observed student
        #[arg(long)]
        all_students: bool,
    },
    /// Teacher comments on recent submissions
    Feedback {
        /// Look-back window in days
        #[arg(long, default_value_t = 14)]
        days: i64,
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// Teachers and TAs across courses
    People {
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// List observed students
    Students,
    /// Recent course announcements
    Announcements {
        /// Look-back window in days
        #[arg(long, default_value_t = 14)]
        days: i64,
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// Inbox conversations
    Inbox {
        /// Scope: inbox, unread, archived, starred, or sent
        #[arg(long)]
        scope: Option<String>,
        /// Restrict to conversations in one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// Announcements and inbox in one view
    Communications {
        /// Announcement look-back window in days
        #[arg(long, default_value_t = 14)]
        days: i64,
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// Upcoming course calendar events
    Calendar {
        /// Look-ahead window in days
        #[arg(long, default_value_t = 14)]
        days: i64,
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// Discussion topics with recent activity
    Discussions {
        /// Look-back window in days
        #[arg(long, default_value_t = 14)]
        days: i64,
        /// Restrict to one course
        #[arg(long)]
        course_id: Option<u64>,
    },
    /// Run as an MCP server over stdio
    #[command(long_about = "
Runs canvas-lens as an MCP (Model Context Protocol) server over stdio,
exposing every query as a read-only tool for AI assistants.

Example Claude Code configuration:
  { \"command\": \"canvas-lens\", \"args\": [\"serve\"] }
")]
    Serve,
    /// Run the local HTTP/JSON API
    Api {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_flags_parse() {
        let cli = Cli::try_parse_from([
            "canvas-lens",
            "missing",
            "--summary",
            "--include-unsubmitted",
            "--course-id",
            "42",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Missing {
                summary,
                include_unsubmitted,
                all_grading_periods,
                course_id,
            }) => {
                assert!(summary);
                assert!(include_unsubmitted);
                assert!(!all_grading_periods);
                assert_eq!(course_id, Some(42));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn stats_hides_empty_courses_unless_asked() {
        let cli = Cli::try_parse_from(["canvas-lens", "stats"]).unwrap();
        match cli.command {
            Some(Commands::Stats { include_empty }) => assert!(!include_empty),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["canvas-lens", "stats", "--include-empty"]).unwrap();
        match cli.command {
            Some(Commands::Stats { include_empty }) => assert!(include_empty),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_student_flag_parses_after_subcommand() {
        let cli =
            Cli::try_parse_from(["canvas-lens", "courses", "--student", "5678"]).unwrap();
        assert_eq!(cli.student.as_deref(), Some("5678"));
    }

    #[test]
    fn api_port_defaults() {
        let cli = Cli::try_parse_from(["canvas-lens", "api"]).unwrap();
        match cli.command {
            Some(Commands::Api { port }) => assert_eq!(port, 3000),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
