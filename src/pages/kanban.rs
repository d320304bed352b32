use leptos::prelude::*;
use crate::core::config::BoardConfig;
use crate::features::kanban::components::{KanbanBoard, KanbanHeader, TaskForm};
use crate::features::kanban::hooks::use_board;

#[component]
pub fn Kanban(config: BoardConfig) -> impl IntoView {
    // Board state lives for as long as this page is mounted
    let board = use_board(config);
    provide_context(board);

    view! {
        <div class="kanban-page" class:editing=move || board.is_editing()>
            <div class="main-content">
                <KanbanHeader title="Kanban Board" />
                <TaskForm />
                <KanbanBoard />
            </div>
        </div>
    }
}
