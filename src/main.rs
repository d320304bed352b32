use leptos::prelude::*;
use kanban_board::app::App;
use kanban_board::core::config::AppConfig;
use kanban_board::core::services::init_logging;

const CONFIG: &str = include_str!("../config/board.json");

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::from_json(CONFIG) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_logging(&config.log_level);
    if let Some(e) = config_error {
        tracing::error!(error = %e, "bundled config rejected, using defaults");
    }

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
