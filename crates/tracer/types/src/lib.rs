//! Core types shared across tracer components.
//!
//! This crate defines the wire shapes returned by the chain RPC (`trace_block`
//! entries and block headers), the extracted MEV block records persisted by the
//! ledger and served by the query API, and the hex quantity parsing used on
//! both sides.

mod block;
pub use block::{MevBlock, MevTransaction};

mod trace;
pub use trace::{BlockHeader, TraceAction, TraceEntry};

pub mod quantity;
pub use quantity::{HexQuantityError, parse_hex_quantity, parse_hex_u64};
