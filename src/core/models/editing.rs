/// Where the task under edit sat when editing began, kept current while the
/// board changes underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCursor {
    pub column_id: String,
    pub index: usize,
    pub task_id: String,
}

impl EditCursor {
    pub fn new(column_id: impl Into<String>, index: usize, task_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            index,
            task_id: task_id.into(),
        }
    }
}

/// Editing lifecycle: `Idle -> Editing -> Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EditCursor),
}

impl EditState {
    pub fn cursor(&self) -> Option<&EditCursor> {
        match self {
            EditState::Idle => None,
            EditState::Editing(cursor) => Some(cursor),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditState::Editing(_))
    }
}
