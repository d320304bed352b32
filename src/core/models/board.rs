use std::collections::{HashMap, HashSet};

use super::{Column, ColumnView, EditCursor, Task, TaskDraft};
use crate::core::config::BoardConfig;
use crate::core::error::{BoardError, Result};
use crate::core::services::IdGenerator;

// Fresh draws before a colliding generator gets a numeric suffix instead.
const MAX_ID_DRAWS: usize = 16;

/// Columns keyed by id plus their left-to-right order.
///
/// Methods returning `Err` leave the board untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: HashMap<String, Column>,
    column_order: Vec<String>,
    column_title_prefix: String,
    next_column_seq: usize,
}

impl Board {
    /// Empty board with no columns. `BoardConfig` always seeds at least one,
    /// so this is mainly a starting point for tests.
    pub fn empty(column_title_prefix: impl Into<String>) -> Self {
        Self {
            columns: HashMap::new(),
            column_order: Vec::new(),
            column_title_prefix: column_title_prefix.into(),
            next_column_seq: 0,
        }
    }

    /// Builds the starting board. A config that fails validation is replaced
    /// by the default one, so the board always has at least one column.
    pub fn from_config(config: &BoardConfig, ids: &mut dyn IdGenerator) -> Self {
        let fallback;
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(error = %e, "invalid board config, using defaults");
                fallback = BoardConfig::default();
                &fallback
            }
        };

        let mut board = Self::empty(config.column_title_prefix.clone());
        for title in &config.columns {
            let id = board.add_column();
            if let Some(column) = board.columns.get_mut(&id) {
                column.title = title.clone();
            }
        }

        if let Some(seed) = &config.seed_task {
            let column_id = board
                .column_order
                .get(seed.column)
                .or_else(|| board.column_order.first())
                .cloned();
            if let Some(column_id) = column_id {
                let task = Task::new(board.fresh_task_id(ids), seed.name.clone(), seed.priority);
                if let Err(e) = board.push_task(&column_id, task) {
                    tracing::warn!(error = %e, "could not place seed task");
                }
            }
        }

        board
    }

    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.get(column_id)
    }

    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    /// Columns in display order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    pub fn column_views(&self) -> Vec<ColumnView> {
        self.columns().map(ColumnView::from).collect()
    }

    pub fn task_count(&self) -> usize {
        self.columns.values().map(Column::len).sum()
    }

    pub fn task_at(&self, column_id: &str, index: usize) -> Option<&Task> {
        self.columns.get(column_id).and_then(|c| c.tasks.get(index))
    }

    /// Current column and index of a task.
    pub fn locate_task(&self, task_id: &str) -> Option<(String, usize)> {
        self.columns()
            .find_map(|c| c.position_of(task_id).map(|index| (c.id.clone(), index)))
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.columns.values().any(|c| c.position_of(task_id).is_some())
    }

    fn column_mut(&mut self, column_id: &str) -> Result<&mut Column> {
        self.columns
            .get_mut(column_id)
            .ok_or_else(|| BoardError::ColumnNotFound(column_id.to_string()))
    }

    fn check_task_index(&self, column_id: &str, index: usize) -> Result<()> {
        let len = self
            .columns
            .get(column_id)
            .map(Column::len)
            .ok_or_else(|| BoardError::ColumnNotFound(column_id.to_string()))?;
        if index >= len {
            return Err(BoardError::TaskIndexOutOfRange {
                column_id: column_id.to_string(),
                index,
                len,
            });
        }
        Ok(())
    }

    /// Moves the task at `source_index` to `dest_index`, removing first and
    /// then inserting into the post-removal list. A destination past the end
    /// appends. Returns the index the task landed at.
    pub fn move_task(
        &mut self,
        source_column: &str,
        source_index: usize,
        dest_column: &str,
        dest_index: usize,
    ) -> Result<usize> {
        self.check_task_index(source_column, source_index)?;
        if !self.columns.contains_key(dest_column) {
            return Err(BoardError::ColumnNotFound(dest_column.to_string()));
        }

        let task = self.column_mut(source_column)?.tasks.remove(source_index);
        let destination = self.column_mut(dest_column)?;
        let landed = dest_index.min(destination.len());
        if landed != dest_index {
            tracing::debug!(dest_column, dest_index, landed, "clamped drop index");
        }
        destination.tasks.insert(landed, task);
        Ok(landed)
    }

    /// Appends a new empty column and returns its id.
    pub fn add_column(&mut self) -> String {
        let id = loop {
            self.next_column_seq += 1;
            let candidate = format!("column-{}", self.next_column_seq);
            if !self.columns.contains_key(&candidate) {
                break candidate;
            }
        };
        let title = format!("{} {}", self.column_title_prefix, self.columns.len() + 1);
        self.columns.insert(id.clone(), Column::new(id.clone(), title));
        self.column_order.push(id.clone());
        id
    }

    /// Empty titles are allowed.
    pub fn rename_column(&mut self, column_id: &str, title: impl Into<String>) -> Result<()> {
        self.column_mut(column_id)?.title = title.into();
        Ok(())
    }

    /// Removes a column together with its tasks. The last column stays.
    pub fn remove_column(&mut self, column_id: &str) -> Result<Column> {
        if !self.columns.contains_key(column_id) {
            return Err(BoardError::ColumnNotFound(column_id.to_string()));
        }
        if self.columns.len() == 1 {
            return Err(BoardError::LastColumn);
        }
        self.column_order.retain(|id| id != column_id);
        self.columns
            .remove(column_id)
            .ok_or_else(|| BoardError::ColumnNotFound(column_id.to_string()))
    }

    pub fn push_task(&mut self, column_id: &str, task: Task) -> Result<usize> {
        let at = self.column(column_id).map(Column::len).unwrap_or(0);
        self.insert_task(column_id, at, task)
    }

    /// Inserts at `index`, clamped to the column length. Rejects an id that is
    /// already on the board.
    pub fn insert_task(&mut self, column_id: &str, index: usize, task: Task) -> Result<usize> {
        if !self.columns.contains_key(column_id) {
            return Err(BoardError::ColumnNotFound(column_id.to_string()));
        }
        if self.contains_task(&task.id) {
            return Err(BoardError::DuplicateTaskId(task.id));
        }
        let column = self.column_mut(column_id)?;
        let at = index.min(column.len());
        column.tasks.insert(at, task);
        Ok(at)
    }

    pub fn delete_task(&mut self, column_id: &str, index: usize) -> Result<Task> {
        self.check_task_index(column_id, index)?;
        Ok(self.column_mut(column_id)?.tasks.remove(index))
    }

    /// Drops every task carrying `task_id`, in any column. Returns how many
    /// were removed.
    pub fn remove_task_everywhere(&mut self, task_id: &str) -> usize {
        let mut removed = 0;
        for column in self.columns.values_mut() {
            let before = column.tasks.len();
            column.tasks.retain(|t| t.id != task_id);
            removed += before - column.tasks.len();
        }
        removed
    }

    /// Creates a task (no cursor) or rewrites the edited one (cursor given).
    ///
    /// An edit whose cursor still matches the target column replaces the task
    /// in place. Otherwise every copy of the id is removed and the task is
    /// reinserted into the target column at the cursor index, clamped.
    /// Returns the task id.
    pub fn upsert_task(
        &mut self,
        draft: &TaskDraft,
        editing: Option<&EditCursor>,
        ids: &mut dyn IdGenerator,
    ) -> Result<String> {
        let name = draft.trimmed_name().ok_or(BoardError::EmptyTaskName)?.to_string();
        let target = draft.column_id.as_str();
        if !self.columns.contains_key(target) {
            return Err(BoardError::ColumnNotFound(target.to_string()));
        }

        let Some(cursor) = editing else {
            let task = Task::new(self.fresh_task_id(ids), name, draft.priority);
            let id = task.id.clone();
            self.push_task(target, task)?;
            tracing::debug!(task_id = %id, column_id = target, "created task");
            return Ok(id);
        };

        let task = Task::new(cursor.task_id.clone(), name, draft.priority);
        let column = self.column_mut(target)?;
        let in_place = cursor.column_id == target
            && column
                .tasks
                .get(cursor.index)
                .is_some_and(|t| t.id == cursor.task_id);
        if in_place {
            column.tasks[cursor.index] = task;
            tracing::debug!(task_id = %cursor.task_id, column_id = target, "updated task in place");
            return Ok(cursor.task_id.clone());
        }

        let removed = self.remove_task_everywhere(&cursor.task_id);
        if removed != 1 {
            tracing::warn!(task_id = %cursor.task_id, removed, "edited task was not found exactly once");
        }
        let at = self.insert_task(target, cursor.index, task)?;
        tracing::debug!(task_id = %cursor.task_id, column_id = target, index = at, "reinserted edited task");
        Ok(cursor.task_id.clone())
    }

    /// Draws an id that no task on the board carries yet.
    pub fn fresh_task_id(&self, ids: &mut dyn IdGenerator) -> String {
        let mut candidate = ids.next_id();
        for _ in 1..MAX_ID_DRAWS {
            if !self.contains_task(&candidate) {
                return candidate;
            }
            candidate = ids.next_id();
        }
        let mut suffix = 1;
        let base = candidate;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !self.contains_task(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Checks the structural invariants: `column_order` is a permutation of
    /// the column keys and task ids are unique across the board.
    pub fn validate(&self) -> Result<()> {
        if self.column_order.len() != self.columns.len() {
            return Err(BoardError::Inconsistent(format!(
                "{} ids in column order but {} columns",
                self.column_order.len(),
                self.columns.len()
            )));
        }

        let mut seen_columns = HashSet::new();
        for id in &self.column_order {
            if !seen_columns.insert(id.as_str()) {
                return Err(BoardError::Inconsistent(format!("column {id} ordered twice")));
            }
            match self.columns.get(id) {
                Some(column) if column.id == *id => {}
                Some(column) => {
                    return Err(BoardError::Inconsistent(format!(
                        "column keyed {id} carries id {}",
                        column.id
                    )))
                }
                None => {
                    return Err(BoardError::Inconsistent(format!("ordered column {id} is missing")))
                }
            }
        }

        let mut seen_tasks = HashSet::new();
        for task in self.columns.values().flat_map(|c| c.tasks.iter()) {
            if !seen_tasks.insert(task.id.as_str()) {
                return Err(BoardError::Inconsistent(format!("task id {} is duplicated", task.id)));
            }
        }
        Ok(())
    }
}
