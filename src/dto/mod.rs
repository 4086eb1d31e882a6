//! View data handed to the presentation layer.

pub mod board;
pub mod tickets;
