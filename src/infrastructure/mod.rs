pub mod config;
pub mod http;
pub mod services;

pub use config::ApiConfig;
pub use http::ApiClient;
