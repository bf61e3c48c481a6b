use std::fmt::Display;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// How `assemble` and `check` print their reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatOptions {
    /// Pretty JSON, for scripts and CI
    #[value(name = "json")]
    Json,
    /// Colored summary
    #[value(name = "stdout")]
    Stdout,
}

impl FormatOptions {
    /// # Errors
    /// Returns error if `report` cannot be serialized.
    pub fn render<T: Display + Serialize>(self, report: &T) -> Result<String> {
        Ok(match self {
            Self::Stdout => report.to_string(),
            Self::Json => serde_json::to_string_pretty(report)?,
        })
    }

    /// # Errors
    /// Returns error if `report` cannot be serialized.
    pub fn print<T: Display + Serialize>(self, report: &T) -> Result<()> {
        println!("{}", self.render(report)?);
        Ok(())
    }
}
