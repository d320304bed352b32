use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{BoardError, Result};
use crate::core::models::Priority;

/// Task placed on the board at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTask {
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    /// Position of the seed column in `BoardConfig::columns`.
    #[serde(default)]
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Titles of the initial columns, left to right.
    pub columns: Vec<String>,
    pub seed_task: Option<SeedTask>,
    /// Prefix for auto-numbered column titles ("Column 4").
    pub column_title_prefix: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                "To Do".to_string(),
                "In Progress".to_string(),
                "Done".to_string(),
            ],
            seed_task: None,
            column_title_prefix: "Column".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(BoardError::Config("at least one column is required".to_string()));
        }
        if let Some(seed) = &self.seed_task {
            if seed.name.trim().is_empty() {
                return Err(BoardError::Config("seed task name is empty".to_string()));
            }
            if seed.column >= self.columns.len() {
                return Err(BoardError::Config(format!(
                    "seed task column {} is out of range ({} columns)",
                    seed.column,
                    self.columns.len()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// One of trace, debug, info, warn, error.
    pub log_level: String,
    pub board: BoardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            board: BoardConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|e| BoardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        tracing::Level::from_str(self.log_level.trim()).map_err(|_| {
            BoardError::Config(format!("unknown log level {:?}", self.log_level))
        })?;
        self.board.validate()
    }
}
