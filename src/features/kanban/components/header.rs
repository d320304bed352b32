use leptos::prelude::*;
use crate::features::kanban::hooks::BoardHook;

#[component]
pub fn KanbanHeader(#[prop(into)] title: String) -> impl IntoView {
    let board = use_context::<BoardHook>().expect("BoardHook context");

    let total_tasks = move || {
        board
            .column_ids()
            .iter()
            .filter_map(|id| board.column(id))
            .map(|c| c.task_count)
            .sum::<usize>()
    };

    view! {
        <header class="kanban-header">
            <div class="kanban-header-left">
                <h1>{title}</h1>
                <span class="task-count">{move || format!("{} tasks", total_tasks())}</span>
            </div>
            <div class="kanban-actions">
                <button class="btn-primary kanban-header-btn" on:click=move |_| board.add_column()>
                    "Add Column"
                </button>
            </div>
        </header>
    }
}
