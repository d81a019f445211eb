//! Command implementations, one module per feature area.
//!
//! Every command resolves the effective student, calls the matching
//! aggregation service, and renders the result through
//! [`crate::output`] in the selected format.

pub mod assignments;
pub mod calendar;
pub mod communications;
pub mod courses;
pub mod feedback;
pub mod grades;
pub mod missing;
pub mod people;
pub mod status;

use canvas_lens::api::users::{effective_student, UserRef};
use canvas_lens::{CanvasClient, Config};

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Everything a command needs: a client, the loaded configuration, and
/// the global flags.
pub struct CommandContext {
    pub client: CanvasClient,
    pub config: Config,
    pub format: OutputFormat,
    pub student: Option<String>,
}

impl CommandContext {
    /// Build a context from the environment and the global CLI flags.
    pub fn from_env(format: OutputFormat, student: Option<String>) -> CliResult<Self> {
        let config = Config::from_env()?;
        let client = CanvasClient::new(&config)?;
        Ok(Self {
            client,
            config,
            format,
            student,
        })
    }

    /// The student this invocation targets: `--student`, then the
    /// configured default, then the authenticated user.
    pub fn student(&self) -> CliResult<UserRef> {
        Ok(effective_student(
            self.student.as_deref(),
            self.config.default_student_id.as_deref(),
        )?)
    }
}
