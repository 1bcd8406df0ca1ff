pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod progress;
pub mod stats;
pub mod storage;
