//! MCP Server for course tag generation
//!
//! Exposes single-record and CSV batch tagging as MCP tools over stdio.

mod params;
mod server;
mod types;

pub use server::{run_mcp_server, TagService};
