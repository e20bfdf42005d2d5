//! # types
//!
//! Public structs produced by the DBC scan.

pub mod catalog;
pub mod errors;
pub mod message;
pub mod signal;
