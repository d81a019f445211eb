use std::process;

mod api_server;
mod cli;
mod commands;
mod error;
mod exit_codes;
mod output;

use clap::CommandFactory;
use cli::{Cli, Commands};
use commands::CommandContext;
use error::CliResult;
use exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Pick up CANVAS_* settings from a .env file when present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    // Fast path for help.
    let Some(command) = cli.command else {
        Cli::command().print_help().expect("failed to print help");
        process::exit(EXIT_SUCCESS);
    };

    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("canvas_lens={default_level},canvas_lens_cli={default_level}")));

    // Logs always go to stderr: stdout carries command output, and in
    // MCP mode it carries the protocol stream.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(command, cli.format, cli.student).await {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code
        }
    };
    process::exit(exit_code);
}

async fn run(
    command: Commands,
    format: cli::OutputFormat,
    student: Option<String>,
) -> CliResult<()> {
    match command {
        Commands::Serve => return run_server().await,
        Commands::Api { port } => {
            let config = canvas_lens::Config::from_env()?;
            return api_server::run(config, port).await;
        }
        _ => {}
    }

    let context = CommandContext::from_env(format, student)?;
    match command {
        Commands::Courses => commands::courses::run(&context).await,
        Commands::Missing {
            summary,
            include_unsubmitted,
            all_grading_periods,
            course_id,
        } => {
            commands::missing::run(
                &context,
                &commands::missing::MissingArgs {
                    summary,
                    include_unsubmitted,
                    all_grading_periods,
                    course_id,
                },
            )
            .await
        }
        Commands::Unsubmitted {
            all_grading_periods,
            course_id,
        } => commands::missing::run_unsubmitted(&context, all_grading_periods, course_id).await,
        Commands::Assignments {
            course_id,
            bucket,
            due_this_week,
            search,
        } => {
            commands::assignments::run(
                &context,
                &commands::assignments::AssignmentsArgs {
                    course_id,
                    bucket,
                    due_this_week,
                    search,
                },
            )
            .await
        }
        Commands::Grades { days, below } => commands::grades::run(&context, days, below).await,
        Commands::Due { days, hide_graded } => {
            commands::assignments::run_due(&context, days, hide_graded).await
        }
        Commands::Upcoming { course_id } => {
            commands::assignments::run_upcoming(&context, course_id).await
        }
        Commands::Todo {
            days,
            hide_submitted,
        } => commands::assignments::run_todo(&context, days, hide_submitted).await,
        Commands::Stats { include_empty } => {
            commands::grades::run_stats(&context, include_empty).await
        }
        Commands::Status { all_students } => commands::status::run(&context, all_students).await,
        Commands::Feedback { days, course_id } => {
            commands::feedback::run(&context, days, course_id).await
        }
        Commands::People { course_id } => commands::people::run(&context, course_id).await,
        Commands::Students => commands::people::run_students(&context).await,
        Commands::Announcements { days, course_id } => {
            commands::communications::run_announcements(&context, days, course_id).await
        }
        Commands::Inbox { scope, course_id } => {
            commands::communications::run_inbox(&context, scope, course_id).await
        }
        Commands::Communications { days, course_id } => {
            commands::communications::run_communications(&context, days, course_id).await
        }
        Commands::Calendar { days, course_id } => {
            commands::calendar::run(&context, days, course_id).await
        }
        Commands::Discussions { days, course_id } => {
            commands::calendar::run_discussions(&context, days, course_id).await
        }
        Commands::Serve | Commands::Api { .. } => unreachable!("handled above"),
    }
}

async fn run_server() -> CliResult<()> {
    use canvas_lens::mcp::CanvasMcpServer;
    use rmcp::serve_server;
    use rmcp::transport::io::stdio;
    use tokio_util::sync::CancellationToken;

    let config = canvas_lens::Config::from_env()?;
    let server = CanvasMcpServer::new(config)?;

    let ct = CancellationToken::new();
    let ct_clone = ct.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");
        tracing::info!("shutdown signal received");
        ct_clone.cancel();
    });

    tracing::info!("starting MCP server on stdio");
    match serve_server(server, stdio()).await {
        Ok(_running_service) => {
            ct.cancelled().await;
            tracing::info!("MCP server exited");
            Ok(())
        }
        Err(e) => Err(error::CliError::new(
            format!("MCP server error: {e}"),
            EXIT_ERROR,
        )),
    }
}
