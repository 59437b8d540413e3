use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Table,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            _ => bail!("Invalid REPORT_FORMAT '{}': expected 'table' or 'json'", s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub operations_file: PathBuf,
    pub format: ReportFormat,
    /// Zoom the output onto this point and its neighbors
    pub focus_index: Option<usize>,
}

impl ReportConfig {
    /// Load from the environment. A path given as the first argument takes
    /// precedence over `OPERATIONS_FILE`.
    pub fn from_env(path_arg: Option<String>) -> Result<Self> {
        Self::from_lookup(path_arg, |key| env::var(key).ok())
    }

    fn from_lookup(
        path_arg: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let operations_file = path_arg
            .or_else(|| lookup("OPERATIONS_FILE"))
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .context("No operations file: pass a path or set OPERATIONS_FILE")?;

        let format = lookup("REPORT_FORMAT")
            .unwrap_or_else(|| "table".to_string())
            .parse()?;

        let focus_index = lookup("FOCUS_INDEX")
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                v.trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid FOCUS_INDEX '{}'", v))
            })
            .transpose()?;

        let config = Self {
            operations_file,
            format,
            focus_index,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.operations_file.is_dir() {
            bail!(
                "OPERATIONS_FILE points to a directory: {}",
                self.operations_file.display()
            );
        }
        Ok(())
    }
}
