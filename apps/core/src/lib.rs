//! MindMosaic core: mood classification, per-mood recommendations, and the
//! local wellness record (mood history, journal, community tips).

pub mod brain;
pub mod clients;
pub mod companion;
pub mod config;
pub mod error;
pub mod fs_manager;
pub mod models;
pub mod recommendations;
pub mod speech;
pub mod storage;
pub mod tips;
pub mod wellness;

#[cfg(test)]
mod tests;

pub use companion::{ChatSession, Companion, Reply};
pub use config::AppConfig;
pub use error::AppError;
