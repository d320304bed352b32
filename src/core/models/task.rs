use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn all() -> Vec<Priority> {
        vec![Priority::Low, Priority::Medium, Priority::High]
    }

    /// Case-insensitive parse of a recognised priority value.
    pub fn parse(value: &str) -> Option<Priority> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Normalizes raw input (select values, config strings). Anything
    /// unrecognised falls back to the default priority.
    pub fn from_input(value: &str) -> Priority {
        Priority::parse(value).unwrap_or_else(|| {
            tracing::debug!(value, "unrecognised priority, using default");
            Priority::default()
        })
    }

    /// CSS class for the priority badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Priority::Low => "priority-badge priority-low",
            Priority::Medium => "priority-badge priority-medium",
            Priority::High => "priority-badge priority-high",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Priority::from_input(&value)
    }
}

impl From<Priority> for &'static str {
    fn from(priority: Priority) -> Self {
        priority.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority,
        }
    }
}

/// Transient contents of the task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: Option<String>,
    pub name: String,
    pub priority: Priority,
    pub column_id: String,
}

impl TaskDraft {
    pub fn for_column(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            ..Self::default()
        }
    }

    pub fn from_task(task: &Task, column_id: &str) -> Self {
        Self {
            id: Some(task.id.clone()),
            name: task.name.clone(),
            priority: task.priority,
            column_id: column_id.to_string(),
        }
    }

    /// Name with surrounding whitespace removed, or `None` if nothing is left.
    pub fn trimmed_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}
