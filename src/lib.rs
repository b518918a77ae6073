use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::ApiConfig;

pub mod app;
pub mod application;
pub mod domain;
pub mod i18n;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;
pub mod view_state;

/// Install logging, then mount the dashboard
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let config = ApiConfig::default();
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(config.log_level)));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("🚀 Stock dashboard v{} (api {})", env!("CARGO_PKG_VERSION"), config.base_url),
    );

    leptos::mount_to_body(app::App);
}
