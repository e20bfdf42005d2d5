//! # dbc_catalog
//!
//! Best-effort decoder for **CAN DBC** files, producing a browsable catalog.
//!
//! ## Highlights
//! - **Line-oriented scan**: `BO_`, `SG_`, `VAL_` and `BA_ "CI_SigId"` records are decoded into a
//!   SlotMap-backed [`Catalog`]; every other record is ignored.
//! - **Never aborts**: a malformed record is skipped and reported in [`Catalog::diagnostics`]
//!   (and through the `log` facade).
//! - **J1939 friendly ids**: 29 bit masking plus source / PGN / priority decomposition.
//! - **Shared signals**: `iter_signals()` and each message's signal list refer to the same
//!   instances.
//! - **Lookups and search**: by name or CAN id, and case-insensitive substring search.
//!

#[cfg(feature = "dbc")]
pub mod dbc;

// Top-level re-exports
#[cfg(feature = "dbc")]
#[doc(inline)]
pub use crate::dbc::types::{
    catalog::{Catalog, MessageKey, SignalKey},
    errors::{DbcParseError, Diagnostic, RecordError},
    message::{IdFormat, Message},
    signal::{Endianness, MuxRole, Signal, Signess, State},
};
