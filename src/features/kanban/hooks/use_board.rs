use leptos::prelude::*;
use crate::core::config::BoardConfig;
use crate::core::error::Result;
use crate::core::models::{ColumnView, DraggableLocation, DropResult, Priority, Task, TaskDraft};
use crate::features::kanban::services::BoardState;

// Source position and task id of the card currently being dragged
type DragSource = (DraggableLocation, String);

/// Reactive handle on the board. Copy it freely into event handlers; all
/// writes go through the single `RwSignal<BoardState>`.
#[derive(Clone, Copy)]
pub struct BoardHook {
    state: RwSignal<BoardState>,
    dragging: RwSignal<Option<DragSource>>,
}

pub fn use_board(config: BoardConfig) -> BoardHook {
    BoardHook {
        state: RwSignal::new(BoardState::new(&config)),
        dragging: RwSignal::new(None),
    }
}

impl BoardHook {
    pub fn column_ids(&self) -> Vec<String> {
        self.state.with(|s| s.board().column_order().to_vec())
    }

    pub fn column(&self, column_id: &str) -> Option<ColumnView> {
        self.state
            .with(|s| s.board().column(column_id).map(ColumnView::from))
    }

    pub fn column_title(&self, column_id: &str) -> Option<String> {
        self.state
            .with(|s| s.board().column(column_id).map(|c| c.title.clone()))
    }

    /// Task ids of a column in display order, the keys its cards render by.
    pub fn task_ids(&self, column_id: &str) -> Vec<String> {
        self.state.with(|s| {
            s.board()
                .column(column_id)
                .map(|c| c.task_ids())
                .unwrap_or_default()
        })
    }

    /// Index and contents of a task within a column.
    pub fn task(&self, column_id: &str, task_id: &str) -> Option<(usize, Task)> {
        self.state.with(|s| {
            s.board()
                .column(column_id)
                .and_then(|c| c.find(task_id))
                .map(|(index, task)| (index, task.clone()))
        })
    }

    /// (id, title) pairs for the column picker.
    pub fn column_options(&self) -> Vec<(String, String)> {
        self.state.with(|s| {
            s.board()
                .columns()
                .map(|c| (c.id.clone(), c.title.clone()))
                .collect()
        })
    }

    pub fn draft(&self) -> TaskDraft {
        self.state.with(|s| s.draft().clone())
    }

    pub fn is_editing(&self) -> bool {
        self.state.with(|s| s.is_editing())
    }

    pub fn is_dragging(&self, task_id: &str) -> bool {
        self.dragging
            .with(|d| d.as_ref().is_some_and(|(_, id)| id == task_id))
    }

    // Runs one container operation; subscribers are notified only on success.
    fn apply<T>(&self, action: &'static str, op: impl FnOnce(&mut BoardState) -> Result<T>) -> Option<T> {
        let outcome = self.state.try_maybe_update(|state| {
            let result = op(state);
            (result.is_ok(), result)
        })?;
        match outcome {
            Ok(value) => Some(value),
            Err(e) if e.is_expected() => {
                tracing::debug!(action, reason = %e, "declined");
                None
            }
            Err(e) => {
                tracing::warn!(action, error = %e, "declined");
                None
            }
        }
    }

    pub fn add_column(&self) {
        self.state.update(|s| {
            s.add_column();
        });
    }

    pub fn rename_column(&self, column_id: String, title: String) {
        self.apply("rename column", |s| s.rename_column(&column_id, title));
    }

    pub fn remove_column(&self, column_id: String) {
        self.apply("remove column", |s| s.remove_column(&column_id));
    }

    pub fn set_draft_name(&self, name: String) {
        self.state.update(|s| s.set_draft_name(name));
    }

    pub fn set_draft_priority(&self, value: &str) {
        let priority = Priority::from_input(value);
        self.state.update(|s| s.set_draft_priority(priority));
    }

    pub fn set_draft_column(&self, column_id: String) {
        self.apply("select column", |s| s.set_draft_column(&column_id));
    }

    pub fn submit(&self) {
        self.apply("save task", |s| s.upsert_task());
    }

    pub fn delete_task(&self, column_id: String, index: usize) {
        self.apply("delete task", |s| s.delete_task(&column_id, index));
    }

    pub fn begin_edit(&self, column_id: String, index: usize) {
        self.apply("edit task", |s| s.begin_edit(&column_id, index));
    }

    pub fn cancel_edit(&self) {
        self.state.update(|s| s.cancel_edit());
    }

    pub fn begin_drag(&self, column_id: String, index: usize, task_id: String) {
        self.dragging
            .set(Some((DraggableLocation::new(column_id, index), task_id)));
    }

    /// Drop onto the card at `index` of `column_id`.
    pub fn drop_at(&self, column_id: String, index: usize) {
        self.finish_drag(Some(DraggableLocation::new(column_id, index)));
    }

    /// Drop onto the empty part of a column: the card goes to the end.
    pub fn drop_at_end(&self, column_id: String) {
        let len = self
            .state
            .with_untracked(|s| s.board().column(&column_id).map(|c| c.len()).unwrap_or(0));
        self.drop_at(column_id, len);
    }

    /// Fired when the gesture ends. A drag that was not dropped on a target
    /// is reported as cancelled.
    pub fn end_drag(&self) {
        self.finish_drag(None);
    }

    fn finish_drag(&self, destination: Option<DraggableLocation>) {
        let Some((source, task_id)) = self.dragging.get_untracked() else {
            return;
        };
        self.dragging.set(None);
        let result = DropResult {
            draggable_id: task_id,
            source,
            destination,
        };
        self.apply("drop task", |s| s.on_drag_end(&result));
    }
}
