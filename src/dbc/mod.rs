//! # dbc
//!
//! `dbc` is the module to read .dbc text into a [`Catalog`].

pub(crate) mod core;
pub mod parse;
pub mod types;

pub use parse::{from_file, from_str};
pub use types::catalog::Catalog;
