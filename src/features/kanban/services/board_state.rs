use crate::core::config::BoardConfig;
use crate::core::error::{BoardError, Result};
use crate::core::models::{Board, ColumnView, DropResult, EditCursor, EditState, Priority, Task, TaskDraft};
use crate::core::services::{IdGenerator, UuidIdGenerator};

/// Session-scoped owner of the board, the task form draft and the editing
/// cursor. Every mutation goes through one of its methods; a failed call
/// leaves all three untouched.
pub struct BoardState {
    board: Board,
    edit: EditState,
    draft: TaskDraft,
    ids: Box<dyn IdGenerator>,
}

impl BoardState {
    pub fn new(config: &BoardConfig) -> Self {
        Self::with_id_generator(config, Box::new(UuidIdGenerator))
    }

    pub fn with_id_generator(config: &BoardConfig, mut ids: Box<dyn IdGenerator>) -> Self {
        let board = Board::from_config(config, ids.as_mut());
        let draft = TaskDraft::for_column(board.column_order().first().cloned().unwrap_or_default());
        tracing::info!(columns = board.column_count(), tasks = board.task_count(), "board created");
        Self {
            board,
            edit: EditState::Idle,
            draft,
            ids,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    pub fn column_views(&self) -> Vec<ColumnView> {
        self.board.column_views()
    }

    pub fn move_task(
        &mut self,
        source_column: &str,
        source_index: usize,
        dest_column: &str,
        dest_index: usize,
    ) -> Result<usize> {
        let landed = self
            .board
            .move_task(source_column, source_index, dest_column, dest_index)?;
        tracing::debug!(source_column, source_index, dest_column, landed, "moved task");
        self.reconcile_edit();
        self.check_invariants();
        Ok(landed)
    }

    /// Applies a finished drag. A drag without destination changes nothing.
    pub fn on_drag_end(&mut self, result: &DropResult) -> Result<usize> {
        let destination = result.destination.as_ref().ok_or(BoardError::DragCancelled)?;
        let source = &result.source;
        let holds_dragged = self
            .board
            .task_at(&source.droppable_id, source.index)
            .is_some_and(|t| t.id == result.draggable_id);
        if !holds_dragged {
            return Err(BoardError::StaleDragSource {
                column_id: source.droppable_id.clone(),
                index: source.index,
                task_id: result.draggable_id.clone(),
            });
        }
        self.move_task(
            &source.droppable_id,
            source.index,
            &destination.droppable_id,
            destination.index,
        )
    }

    pub fn add_column(&mut self) -> String {
        let id = self.board.add_column();
        tracing::debug!(column_id = %id, "added column");
        self.reconcile_edit();
        self.check_invariants();
        id
    }

    pub fn rename_column(&mut self, column_id: &str, title: impl Into<String>) -> Result<()> {
        self.board.rename_column(column_id, title)
    }

    pub fn remove_column(&mut self, column_id: &str) -> Result<()> {
        let removed = self.board.remove_column(column_id)?;
        tracing::debug!(column_id, tasks = removed.tasks.len(), "removed column");
        self.reconcile_edit();
        self.check_invariants();
        Ok(())
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_draft_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
    }

    pub fn set_draft_column(&mut self, column_id: &str) -> Result<()> {
        if self.board.column(column_id).is_none() {
            return Err(BoardError::ColumnNotFound(column_id.to_string()));
        }
        self.draft.column_id = column_id.to_string();
        Ok(())
    }

    /// Submits the task form: creates a task while idle, otherwise commits
    /// the edit and returns to idle. Returns the task id.
    pub fn upsert_task(&mut self) -> Result<String> {
        let id = self
            .board
            .upsert_task(&self.draft, self.edit.cursor(), self.ids.as_mut())?;
        if self.edit.is_editing() {
            self.edit = EditState::Idle;
            self.draft = self.default_draft();
        } else {
            self.draft = TaskDraft::for_column(self.draft.column_id.clone());
        }
        self.check_invariants();
        Ok(id)
    }

    pub fn delete_task(&mut self, column_id: &str, index: usize) -> Result<Task> {
        let task = self.board.delete_task(column_id, index)?;
        tracing::debug!(task_id = %task.id, column_id, index, "deleted task");
        self.reconcile_edit();
        self.check_invariants();
        Ok(task)
    }

    /// Loads a task into the draft and records the editing cursor.
    pub fn begin_edit(&mut self, column_id: &str, index: usize) -> Result<()> {
        if let Some(cursor) = self.edit.cursor() {
            return Err(BoardError::AlreadyEditing(cursor.task_id.clone()));
        }
        let column = self
            .board
            .column(column_id)
            .ok_or_else(|| BoardError::ColumnNotFound(column_id.to_string()))?;
        let task = column.tasks.get(index).ok_or_else(|| BoardError::TaskIndexOutOfRange {
            column_id: column_id.to_string(),
            index,
            len: column.len(),
        })?;
        self.draft = TaskDraft::from_task(task, column_id);
        self.edit = EditState::Editing(EditCursor::new(column_id, index, task.id.clone()));
        tracing::debug!(task_id = %task.id, column_id, index, "editing task");
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        if let Some(cursor) = self.edit.cursor() {
            tracing::debug!(task_id = %cursor.task_id, "edit cancelled");
        }
        self.edit = EditState::Idle;
        self.draft = self.default_draft();
    }

    fn default_draft(&self) -> TaskDraft {
        TaskDraft::for_column(self.board.column_order().first().cloned().unwrap_or_default())
    }

    /// Re-points the cursor at the edited task after the board changed, or
    /// ends the session when that task is gone. Also keeps the draft's target
    /// column pointing at a column that exists.
    fn reconcile_edit(&mut self) {
        if let EditState::Editing(cursor) = &mut self.edit {
            match self.board.locate_task(&cursor.task_id) {
                Some((column_id, index)) => {
                    if self.draft.column_id == cursor.column_id {
                        self.draft.column_id = column_id.clone();
                    }
                    cursor.column_id = column_id;
                    cursor.index = index;
                }
                None => {
                    tracing::debug!(task_id = %cursor.task_id, "edited task disappeared, ending edit");
                    self.edit = EditState::Idle;
                    self.draft = self.default_draft();
                }
            }
        }

        if self.board.column(&self.draft.column_id).is_none() {
            self.draft.column_id = self.default_draft().column_id;
        }
    }

    fn check_invariants(&self) {
        debug_assert_eq!(self.board.validate(), Ok(()));
        if let Some(cursor) = self.edit.cursor() {
            debug_assert!(
                self.board
                    .task_at(&cursor.column_id, cursor.index)
                    .is_some_and(|t| t.id == cursor.task_id),
                "editing cursor out of sync: {cursor:?}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::DraggableLocation;
    use crate::core::services::SequentialIdGenerator;

    fn state() -> BoardState {
        BoardState::with_id_generator(
            &BoardConfig::default(),
            Box::new(SequentialIdGenerator::default()),
        )
    }

    fn add(state: &mut BoardState, column_id: &str, name: &str, priority: Priority) -> String {
        state.set_draft_column(column_id).unwrap();
        state.set_draft_name(name);
        state.set_draft_priority(priority);
        state.upsert_task().unwrap()
    }

    fn names(state: &BoardState, column_id: &str) -> Vec<String> {
        state
            .board()
            .column(column_id)
            .map(|c| c.tasks.iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default()
    }

    fn drop_result(
        task_id: &str,
        source: (&str, usize),
        destination: Option<(&str, usize)>,
    ) -> DropResult {
        DropResult {
            draggable_id: task_id.to_string(),
            source: DraggableLocation::new(source.0, source.1),
            destination: destination.map(|(c, i)| DraggableLocation::new(c, i)),
        }
    }

    #[test]
    fn create_clears_name_but_keeps_target_column() {
        let mut state = state();
        let id = add(&mut state, "column-2", "Write docs", Priority::High);
        assert_eq!(id, "task-1");
        assert_eq!(state.draft().name, "");
        assert_eq!(state.draft().priority, Priority::Low);
        assert_eq!(state.draft().column_id, "column-2");
        assert!(!state.is_editing());
    }

    #[test]
    fn invalid_config_still_gives_a_usable_draft_target() {
        let config = BoardConfig {
            columns: Vec::new(),
            ..BoardConfig::default()
        };
        let mut state =
            BoardState::with_id_generator(&config, Box::new(SequentialIdGenerator::default()));
        assert_eq!(state.board().column_count(), 3);
        assert_eq!(state.draft().column_id, "column-1");

        state.set_draft_name("A");
        state.upsert_task().unwrap();
        assert_eq!(names(&state, "column-1"), ["A"]);
    }

    #[test]
    fn add_column_keeps_draft_on_a_live_column() {
        let mut state = state();
        state.set_draft_column("column-2").unwrap();
        let id = state.add_column();
        assert_eq!(id, "column-4");
        assert_eq!(state.draft().column_id, "column-2");
        assert!(state.board().column(&state.draft().column_id).is_some());
    }

    #[test]
    fn empty_name_keeps_pending_input() {
        let mut state = state();
        state.set_draft_priority(Priority::Medium);
        state.set_draft_name("   ");
        assert_eq!(state.upsert_task(), Err(BoardError::EmptyTaskName));
        assert_eq!(state.board().task_count(), 0);
        assert_eq!(state.draft().name, "   ");
        assert_eq!(state.draft().priority, Priority::Medium);
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut state = state();
        add(&mut state, "column-1", "A", Priority::Low);

        state.begin_edit("column-1", 0).unwrap();
        assert_eq!(state.draft().id.as_deref(), Some("task-1"));
        assert_eq!(state.draft().name, "A");
        state.set_draft_name("B");
        state.set_draft_priority(Priority::High);
        assert_eq!(state.upsert_task().unwrap(), "task-1");

        assert_eq!(
            state.board().column("column-1").unwrap().tasks,
            vec![Task::new("task-1", "B", Priority::High)]
        );
        assert_eq!(state.edit_state(), &EditState::Idle);
        assert_eq!(state.draft(), &TaskDraft::for_column("column-1"));
    }

    #[test]
    fn edit_can_retarget_column() {
        let mut state = state();
        add(&mut state, "column-1", "A", Priority::Low);
        add(&mut state, "column-1", "B", Priority::Low);

        state.begin_edit("column-1", 0).unwrap();
        state.set_draft_column("column-3").unwrap();
        state.upsert_task().unwrap();

        assert_eq!(names(&state, "column-1"), ["B"]);
        assert_eq!(names(&state, "column-3"), ["A"]);
        assert_eq!(state.board().task_count(), 2);
    }

    #[test]
    fn edit_cannot_start_twice() {
        let mut state = state();
        add(&mut state, "column-1", "A", Priority::Low);
        add(&mut state, "column-1", "B", Priority::Low);

        state.begin_edit("column-1", 0).unwrap();
        assert_eq!(
            state.begin_edit("column-1", 1),
            Err(BoardError::AlreadyEditing("task-1".to_string()))
        );
        assert_eq!(state.draft().name, "A");
    }

    #[test]
    fn begin_edit_out_of_range_stays_idle() {
        let mut state = state();
        assert!(matches!(
            state.begin_edit("column-1", 0),
            Err(BoardError::TaskIndexOutOfRange { .. })
        ));
        assert!(!state.is_editing());
    }

    #[test]
    fn cancel_edit_resets_draft_without_touching_board() {
        let mut state = state();
        add(&mut state, "column-2", "A", Priority::Medium);
        let before = state.board().clone();

        state.begin_edit("column-2", 0).unwrap();
        state.set_draft_name("changed");
        state.cancel_edit();

        assert!(!state.is_editing());
        assert_eq!(state.draft(), &TaskDraft::for_column("column-1"));
        assert_eq!(state.board(), &before);
    }

    #[test]
    fn cursor_follows_task_when_an_earlier_task_is_deleted() {
        let mut state = state();
        add(&mut state, "column-1", "A", Priority::Low);
        add(&mut state, "column-1", "B", Priority::Low);

        state.begin_edit("column-1", 1).unwrap();
        state.delete_task("column-1", 0).unwrap();
        assert_eq!(
            state.edit_state().cursor(),
            Some(&EditCursor::new("column-1", 0, "task-2"))
        );

        state.set_draft_name("B2");
        state.upsert_task().unwrap();
        assert_eq!(names(&state, "column-1"), ["B2"]);
    }

    #[test]
    fn cursor_follows_task_dragged_to_another_column() {
        let mut state = state();
        add(&mut state, "column-1", "A", Priority::Low);

        state.begin_edit("column-1", 0).unwrap();
        state.move_task("column-1", 0, "column-2", 0).unwrap();
        assert_eq!(
            state.edit_state().cursor(),
            Some(&EditCursor::new("column-2", 0, "task-1"))
        );
        assert_eq!(state.draft().column_id, "column-2");

        state.set_draft_name("A2");
        state.upsert_task().unwrap();
        assert!(names(&state, "column-1").is_empty());
        assert_eq!(names(&state, "column-2"), ["A2"]);
    }

    #[test]
    fn deleting_the_edited_task_ends_the_edit() {
        let mut state = state();
        add(&mut state, "column-1", "A", Priority::Low);

        state.begin_edit("column-1", 0).unwrap();
        state.delete_task("column-1", 0).unwrap();
        assert!(!state.is_editing());
        assert_eq!(state.draft().name, "");
    }

    #[test]
    fn removing_the_draft_column_retargets_the_draft() {
        let mut state = state();
        add(&mut state, "column-3", "A", Priority::Low);
        state.begin_edit("column-3", 0).unwrap();

        state.remove_column("column-3").unwrap();
        assert!(!state.is_editing());
        assert_eq!(state.draft().column_id, "column-1");
        assert_eq!(state.board().task_count(), 0);
    }

    #[test]
    fn drag_end_moves_task() {
        let mut state = state();
        let id = add(&mut state, "column-1", "A", Priority::Low);
        let landed = state
            .on_drag_end(&drop_result(&id, ("column-1", 0), Some(("column-2", 0))))
            .unwrap();
        assert_eq!(landed, 0);
        assert_eq!(names(&state, "column-2"), ["A"]);
    }

    #[test]
    fn cancelled_drag_is_a_no_op() {
        let mut state = state();
        let id = add(&mut state, "column-1", "A", Priority::Low);
        add(&mut state, "column-1", "B", Priority::Low);
        let before = state.board().clone();

        assert_eq!(
            state.on_drag_end(&drop_result(&id, ("column-1", 0), None)),
            Err(BoardError::DragCancelled)
        );
        assert_eq!(state.board(), &before);
    }

    #[test]
    fn stale_drag_source_is_declined() {
        let mut state = state();
        add(&mut state, "column-1", "A", Priority::Low);
        let before = state.board().clone();

        let err = state
            .on_drag_end(&drop_result("task-99", ("column-1", 0), Some(("column-2", 0))))
            .unwrap_err();
        assert!(matches!(err, BoardError::StaleDragSource { .. }));
        assert_eq!(state.board(), &before);
    }

    #[test]
    fn column_views_follow_column_order() {
        let mut state = state();
        add(&mut state, "column-2", "A", Priority::High);
        let id = state.add_column();
        state.rename_column(&id, "Blocked").unwrap();

        let views = state.column_views();
        let titles: Vec<_> = views.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["To Do", "In Progress", "Done", "Blocked"]);
        assert_eq!(views[1].task_count, 1);
        assert_eq!(views[1].tasks[0].priority, Priority::High);
    }

    #[test]
    fn set_draft_column_rejects_unknown_column() {
        let mut state = state();
        assert!(state.set_draft_column("column-42").is_err());
        assert_eq!(state.draft().column_id, "column-1");
    }
}

#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::core::services::SequentialIdGenerator;

    #[derive(Debug, Clone)]
    enum Op {
        AddColumn,
        RemoveColumn(usize),
        Create(usize, String),
        Move(usize, usize, usize, usize),
        Delete(usize, usize),
        BeginEdit(usize, usize),
        Retarget(usize),
        Submit(String),
        Cancel,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::AddColumn),
            (0..8usize).prop_map(Op::RemoveColumn),
            (0..8usize, "[a-z ]{0,5}").prop_map(|(c, n)| Op::Create(c, n)),
            (0..8usize, 0..6usize, 0..8usize, 0..7usize)
                .prop_map(|(sc, si, dc, di)| Op::Move(sc, si, dc, di)),
            (0..8usize, 0..6usize).prop_map(|(c, i)| Op::Delete(c, i)),
            (0..8usize, 0..6usize).prop_map(|(c, i)| Op::BeginEdit(c, i)),
            (0..8usize).prop_map(Op::Retarget),
            "[a-z]{0,5}".prop_map(Op::Submit),
            Just(Op::Cancel),
        ]
    }

    fn column_at(state: &BoardState, n: usize) -> String {
        let order = state.board().column_order();
        order[n % order.len()].clone()
    }

    fn apply(state: &mut BoardState, op: &Op) {
        // Declined operations are part of the run; only the resulting state matters.
        match op {
            Op::AddColumn => {
                state.add_column();
            }
            Op::RemoveColumn(c) => {
                let id = column_at(state, *c);
                let _ = state.remove_column(&id);
            }
            Op::Create(c, name) => {
                if !state.is_editing() {
                    let id = column_at(state, *c);
                    let _ = state.set_draft_column(&id);
                    state.set_draft_name(name.clone());
                    let _ = state.upsert_task();
                }
            }
            Op::Move(sc, si, dc, di) => {
                let (source, dest) = (column_at(state, *sc), column_at(state, *dc));
                let _ = state.move_task(&source, *si, &dest, *di);
            }
            Op::Delete(c, i) => {
                let id = column_at(state, *c);
                let _ = state.delete_task(&id, *i);
            }
            Op::BeginEdit(c, i) => {
                let id = column_at(state, *c);
                let _ = state.begin_edit(&id, *i);
            }
            Op::Retarget(c) => {
                let id = column_at(state, *c);
                let _ = state.set_draft_column(&id);
            }
            Op::Submit(name) => {
                state.set_draft_name(name.clone());
                let _ = state.upsert_task();
            }
            Op::Cancel => state.cancel_edit(),
        }
    }

    fn seeded(columns: &[Vec<u8>]) -> BoardState {
        let mut state = BoardState::with_id_generator(
            &BoardConfig::default(),
            Box::new(SequentialIdGenerator::default()),
        );
        for (c, tasks) in columns.iter().enumerate() {
            let id = column_at(&state, c);
            for n in tasks {
                state.set_draft_column(&id).unwrap();
                state.set_draft_name(format!("task {n}"));
                state.upsert_task().unwrap();
            }
        }
        state
    }

    proptest! {
        #[test]
        fn any_operation_sequence_keeps_board_consistent(ops in prop::collection::vec(op(), 0..60)) {
            let mut state = seeded(&[]);
            for op in &ops {
                apply(&mut state, op);

                prop_assert_eq!(state.board().validate(), Ok(()));
                if let Some(cursor) = state.edit_state().cursor() {
                    let task = state.board().task_at(&cursor.column_id, cursor.index);
                    prop_assert_eq!(task.map(|t| t.id.as_str()), Some(cursor.task_id.as_str()));
                }
                prop_assert!(state.board().column(&state.draft().column_id).is_some());
            }
        }

        #[test]
        fn move_preserves_count_and_identity(
            columns in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..5), 3),
            source_column in 0..3usize,
            source_pick in any::<prop::sample::Index>(),
            dest_column in 0..3usize,
            dest_pick in any::<prop::sample::Index>(),
        ) {
            let mut state = seeded(&columns);
            let source = column_at(&state, source_column);
            let dest = column_at(&state, dest_column);
            let source_len = state.board().column(&source).map(|c| c.len()).unwrap_or(0);
            prop_assume!(source_len > 0);

            let source_index = source_pick.index(source_len);
            let dest_len = state.board().column(&dest).map(|c| c.len()).unwrap_or(0);
            let dest_index = dest_pick.index(dest_len + 1);
            let moved = state.board().task_at(&source, source_index).cloned();
            let total = state.board().task_count();

            let landed = state.move_task(&source, source_index, &dest, dest_index).unwrap();

            prop_assert_eq!(state.board().task_count(), total);
            prop_assert_eq!(state.board().task_at(&dest, landed).cloned(), moved);
        }

        #[test]
        fn ids_stay_unique(names in prop::collection::vec("[a-z]{1,4}", 0..40), columns in 0..5usize) {
            let mut state = seeded(&[]);
            for _ in 0..columns {
                state.add_column();
            }
            for (n, name) in names.iter().enumerate() {
                let id = column_at(&state, n);
                state.set_draft_column(&id).unwrap();
                state.set_draft_name(name.clone());
                state.upsert_task().unwrap();
            }

            let board = state.board();
            let task_ids: HashSet<_> = board.columns().flat_map(|c| c.tasks.iter().map(|t| t.id.clone())).collect();
            prop_assert_eq!(task_ids.len(), names.len());
            let column_ids: HashSet<_> = board.column_order().iter().collect();
            prop_assert_eq!(column_ids.len(), 3 + columns);
            prop_assert!(board.column_order().iter().all(|id| board.column(id).is_some()));
        }
    }
}
