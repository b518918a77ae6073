//! Leptos components and the JavaScript-facing chart API.

pub mod chart;
pub mod home;
pub mod market;
pub mod settings;
pub mod wasm_api;

pub use chart::CloseLineChart;
pub use home::HomePage;
pub use market::{MoversPage, UpcomingPage};
pub use settings::SettingsPage;
pub use wasm_api::ChartApi;
