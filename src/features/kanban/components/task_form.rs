use leptos::prelude::*;
use leptos::ev;
use crate::core::models::Priority;
use crate::features::kanban::hooks::BoardHook;

#[component]
pub fn TaskForm() -> impl IntoView {
    let board = use_context::<BoardHook>().expect("BoardHook context");

    let handle_submit = move |ev: ev::SubmitEvent| {
        // Keep the browser from reloading the page
        ev.prevent_default();
        board.submit();
    };

    view! {
        <form class="task-form" class:editing=move || board.is_editing() on:submit=handle_submit>
            <div class="form-group">
                <label>"TASK"</label>
                <input
                    type="text"
                    placeholder="Task name..."
                    prop:value=move || board.draft().name
                    on:input=move |ev| board.set_draft_name(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label>"PRIORITY"</label>
                <select on:change=move |ev| board.set_draft_priority(&event_target_value(&ev))>
                    {Priority::all().into_iter().map(|priority| {
                        view! {
                            <option
                                value={priority.as_str()}
                                prop:selected=move || board.draft().priority == priority
                            >
                                {priority.label()}
                            </option>
                        }
                    }).collect::<Vec<_>>()}
                </select>
            </div>
            <div class="form-group">
                <label>"COLUMN"</label>
                <select on:change=move |ev| board.set_draft_column(event_target_value(&ev))>
                    {move || {
                        let selected_column = board.draft().column_id;
                        board.column_options().into_iter().map(|(id, title)| {
                            let selected = id == selected_column;
                            view! { <option value=id prop:selected=selected>{title}</option> }
                        }).collect::<Vec<_>>()
                    }}
                </select>
            </div>
            <div class="form-actions">
                <button type="submit" class="btn-primary">
                    {move || if board.is_editing() { "UPDATE TASK" } else { "ADD TASK" }}
                </button>
                <Show when=move || board.is_editing()>
                    <button type="button" class="btn-secondary" on:click=move |_| board.cancel_edit()>
                        "CANCEL"
                    </button>
                </Show>
            </div>
        </form>
    }
}
