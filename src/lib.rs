use clap::ValueEnum;

pub mod error;
pub mod graphs;
pub mod report;
pub mod search;
pub mod utility;

/// How the binaries print their results.
#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}
