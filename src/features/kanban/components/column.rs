use leptos::prelude::*;
use leptos::ev::DragEvent;
use crate::features::kanban::components::TaskCard;
use crate::features::kanban::hooks::BoardHook;

#[component]
pub fn KanbanColumn(#[prop(into)] column_id: String) -> impl IntoView {
    let board = use_context::<BoardHook>().expect("BoardHook context");

    // Title and card list are tracked separately so renaming the column
    // leaves the cards alone
    let title = Memo::new({
        let column_id = column_id.clone();
        move |_| board.column_title(&column_id).unwrap_or_default()
    });
    let task_ids = Memo::new({
        let column_id = column_id.clone();
        move |_| board.task_ids(&column_id)
    });

    let id_for_rename = column_id.clone();
    let id_for_remove = column_id.clone();
    let id_for_drop = column_id.clone();
    let id_for_cards = column_id;

    view! {
        <div class="kanban-column">
            <div class="column-header">
                <input
                    class="column-title"
                    type="text"
                    placeholder="Untitled"
                    prop:value=move || title.get()
                    on:input=move |ev| board.rename_column(id_for_rename.clone(), event_target_value(&ev))
                />
                <span class="task-count">{move || task_ids.with(|ids| ids.len())}</span>
                <button
                    class="column-remove-btn"
                    title="Remove column"
                    on:click=move |_| board.remove_column(id_for_remove.clone())
                >"×"</button>
            </div>
            <div
                class="column-content"
                on:dragover=move |ev: DragEvent| ev.prevent_default()
                on:drop=move |ev: DragEvent| {
                    ev.prevent_default();
                    board.drop_at_end(id_for_drop.clone());
                }
            >
                <For
                    each=move || task_ids.get()
                    key=|task_id| task_id.clone()
                    children=move |task_id| {
                        view! { <TaskCard column_id=id_for_cards.clone() task_id=task_id /> }
                    }
                />
            </div>
        </div>
    }
}
