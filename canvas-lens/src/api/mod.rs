//! Typed accessors for Canvas resource families
//!
//! Thin wrappers over [`CanvasClient`](crate::client::CanvasClient), one
//! module per resource family. Each accessor translates an explicit
//! option struct into query parameters; none of them aggregate, filter
//! dates, or swallow errors — that is the services' job.

pub mod announcements;
pub mod assignments;
pub mod calendar;
pub mod conversations;
pub mod courses;
pub mod discussions;
pub mod people;
pub mod submissions;
pub mod users;
