pub mod aggregate;
pub mod args;
mod backup;
pub mod commands;
mod config;
mod error;
mod import;
pub mod insights;
pub mod model;
mod repo;
pub mod store;
mod utils;


pub use aggregate::{summarize, Summary};
pub use backup::Backup;
pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use import::{parse_import, ImportMode};
pub use insights::{generate_insights, Insight, Priority};
pub use repo::Repository;
