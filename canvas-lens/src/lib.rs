//! # Canvas Lens
//!
//! A read-only client and aggregation layer over the Canvas LMS REST API,
//! built for parents (observer accounts) and students who want a single
//! view of grades, missing work, and upcoming deadlines across courses.
//!
//! ## Features
//!
//! - **Paginated client**: transparent `Link`-header pagination over every
//!   Canvas collection endpoint
//! - **Resource accessors**: typed wrappers for courses, enrollments,
//!   submissions, missing submissions, planner items, announcements,
//!   calendar events, conversations, discussions, and people
//! - **Aggregation services**: cross-course views such as comprehensive
//!   status, due-this-week, and missing/unsubmitted reconciliation
//! - **MCP support**: every aggregation exposed as a Model Context
//!   Protocol tool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use canvas_lens::{CanvasClient, Config};
//! use canvas_lens::services::courses::course_grades;
//! use canvas_lens::api::users::UserRef;
//!
//! # async fn run() -> canvas_lens::Result<()> {
//! let config = Config::from_env()?;
//! let client = CanvasClient::new(&config)?;
//! let grades = course_grades(&client, &UserRef::Me).await?;
//! for course in grades {
//!     println!("{}: {:?}", course.name, course.current_grade);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// HTTP client core with Link-header pagination
pub mod client;

/// Configuration loaded from the process environment
pub mod config;

/// Unified error types
pub mod error;

/// Grading period resolution
pub mod grading;

/// Typed accessors for Canvas resource families
pub mod api;

/// Cross-course aggregation services and their output contracts
pub mod services;

/// Model Context Protocol (MCP) tool surface
pub mod mcp;

/// Canvas wire types
pub mod types;

pub use client::{CanvasClient, Page, Query, Transport};
pub use config::Config;
pub use error::{Error, Result};

/// Library version, from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
