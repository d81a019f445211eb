//! Cross-course aggregation services
//!
//! One module per user-facing feature. Every service fans out one request
//! per active course, merges, filters, sorts, and reshapes into the
//! stable output contracts in [`types`]. All three front ends (CLI, MCP
//! tools, HTTP API) consume these services and nothing below them.
//!
//! Multi-course services degrade per course: an inaccessible course
//! contributes an empty result (recorded and logged, see [`fan_out`])
//! rather than failing the whole aggregation. Single-course services
//! propagate their errors.

pub mod assignments;
pub mod calendar;
pub mod communications;
pub mod courses;
pub mod discussions;
pub mod due;
pub mod fan_out;
pub mod feedback;
pub mod grades;
pub mod missing;
pub mod people;
pub mod stats;
pub mod status;
pub mod students;
pub mod todo;
pub mod types;
pub mod unsubmitted;
pub mod upcoming;

pub use fan_out::{fan_out_courses, CourseFailure, CourseRef, FanOut};
