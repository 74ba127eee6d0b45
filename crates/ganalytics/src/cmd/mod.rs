//! Command implementations for CLI tools.
//!
//! Each module contains the full implementation for a command,
//! which can be invoked by thin wrapper binaries.

pub mod accounts_cmd;
pub mod common;
pub mod completions;
pub mod report_cmd;
