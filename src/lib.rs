pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod imaging;
pub mod logging;
pub mod matching;
pub mod models;
pub mod verification;

pub use config::AppConfig;
pub use errors::*;
