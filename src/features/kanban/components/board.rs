use leptos::prelude::*;
use crate::features::kanban::components::KanbanColumn;
use crate::features::kanban::hooks::BoardHook;

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let board = use_context::<BoardHook>().expect("BoardHook context");

    view! {
        <div
            class="kanban-board"
            style:grid-template-columns=move || {
                format!("repeat({}, minmax(16rem, 1fr))", board.column_ids().len())
            }
        >
            <For
                each=move || board.column_ids()
                key=|column_id| column_id.clone()
                children=move |column_id| view! { <KanbanColumn column_id=column_id /> }
            />
        </div>
    }
}
