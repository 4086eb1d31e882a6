//! Database models backing the pipeline repository.

pub mod client;
pub mod config;
pub mod opportunity;
pub mod ticket;
