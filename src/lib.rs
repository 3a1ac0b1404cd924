//! Keyword tag generation for college courses.
//!
//! [`tags`] turns a course name and description into a ranked set of keyphrases,
//! [`batch`] applies that to every row of a CSV table.

pub mod batch;
pub mod core;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod tags;
