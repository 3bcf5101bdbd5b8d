//! Library components for the 837I submission CLI.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
