//! jspec Web Server
//!
//! Serves the assembled runner page, focused single-suite pages, and every
//! file reachable through the virtual asset namespace to a browser client.

pub mod page;
pub mod server;
pub mod static_files;

pub use server::{serve, HarnessServer};
