//! bucketsite CLI library
//!
//! Exposes the command definitions, exit codes and output helpers so the
//! integration tests can drive them.

pub mod commands;
pub mod exit_code;
pub mod output;
