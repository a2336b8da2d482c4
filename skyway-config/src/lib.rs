pub mod app_config;

pub use app_config::{Config, SearchConfig, ServerConfig, SiteConfig};
