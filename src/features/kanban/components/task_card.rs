use leptos::prelude::*;
use leptos::ev::DragEvent;
use crate::features::kanban::hooks::BoardHook;

/// One card, keyed by task id. Its position is looked up when an event fires
/// so handlers never act on an index from an older render.
#[component]
pub fn TaskCard(
    #[prop(into)] column_id: String,
    #[prop(into)] task_id: String,
) -> impl IntoView {
    let board = use_context::<BoardHook>().expect("BoardHook context");

    let task = Memo::new({
        let column_id = column_id.clone();
        let task_id = task_id.clone();
        move |_| board.task(&column_id, &task_id)
    });
    let index = move || task.with_untracked(|t| t.as_ref().map(|(index, _)| *index));

    let name = move || task.with(|t| t.as_ref().map(|(_, t)| t.name.clone()).unwrap_or_default());
    let priority = move || task.with(|t| t.as_ref().map(|(_, t)| t.priority).unwrap_or_default());

    let id_for_class = task_id.clone();
    let id_for_drag = task_id;
    let column_for_drag = column_id.clone();
    let column_for_drop = column_id.clone();
    let column_for_edit = column_id.clone();
    let column_for_delete = column_id;

    view! {
        <div
            class="task-card"
            class:dragging=move || board.is_dragging(&id_for_class)
            draggable="true"
            on:dragstart=move |ev: DragEvent| {
                // Firefox only starts a drag when some data is attached
                if let Some(data) = ev.data_transfer() {
                    let _ = data.set_data("text/plain", &id_for_drag);
                }
                if let Some(index) = index() {
                    board.begin_drag(column_for_drag.clone(), index, id_for_drag.clone());
                }
            }
            on:dragend=move |_| board.end_drag()
            on:dragover=move |ev: DragEvent| ev.prevent_default()
            on:drop=move |ev: DragEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                if let Some(index) = index() {
                    board.drop_at(column_for_drop.clone(), index);
                }
            }
        >
            <div class="task-content">
                <h4>{name}</h4>
                <span class=move || priority().badge_class()>{move || priority().label()}</span>
            </div>
            <div class="task-actions">
                <button
                    class="task-action-btn edit-btn"
                    title="Edit task"
                    on:click=move |_| {
                        if let Some(index) = index() {
                            board.begin_edit(column_for_edit.clone(), index);
                        }
                    }
                >"✎"</button>
                <button
                    class="task-action-btn delete-btn"
                    title="Delete task"
                    on:click=move |_| {
                        if let Some(index) = index() {
                            board.delete_task(column_for_delete.clone(), index);
                        }
                    }
                >"🗑"</button>
            </div>
        </div>
    }
}

