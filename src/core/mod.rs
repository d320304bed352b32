pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{AppConfig, BoardConfig, SeedTask};
pub use error::{BoardError, Result};
