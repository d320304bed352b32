use leptos::prelude::*;
use crate::core::config::AppConfig;
use crate::pages::Kanban;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    view! {
        <main class="app">
            <Kanban config={config.board} />
        </main>
    }
}
