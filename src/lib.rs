//! traindeck - HTTP function backend for training exercises, lessons, and
//! shareable access codes
//!
//! Five stateless JSON handlers in front of an external row store and one
//! external model-catalog API.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod records;
pub mod server;
pub mod store;
