pub mod board;
pub mod column;
pub mod drag;
pub mod editing;
pub mod task;

pub use board::Board;
pub use column::{Column, ColumnView};
pub use drag::{DraggableLocation, DropResult};
pub use editing::{EditCursor, EditState};
pub use task::{Priority, Task, TaskDraft};
