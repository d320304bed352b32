pub mod header;
pub mod board;
pub mod column;
pub mod task_card;
pub mod task_form;

pub use header::KanbanHeader;
pub use board::KanbanBoard;
pub use column::KanbanColumn;
pub use task_card::TaskCard;
pub use task_form::TaskForm;
