//! Domain aggregates exposed by the pipeline service layer.

pub mod client;
pub mod opportunity;
pub mod stage;
pub mod ticket;
pub mod types;
pub mod user;
