//! Core runtime for Docket: attribute codecs, the ledger seam, secondary
//! index maintenance, paginated lookups, entity stores, and the positional
//! dispatch surface exported via the `prelude`.

// public exports are one module level down
pub mod codec;
pub mod db;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod ledger;
pub mod obs;

///
/// CONSTANTS
///

/// Fixed width of an encoded numeric attribute, in decimal digits.
///
/// Twenty digits cover the full unsigned 64-bit range, so zero-left-padded
/// decimal text sorts identically to the numbers it encodes.
pub const NUMERIC_WIDTH: usize = 20;

/// Fixed width of an encoded token attribute, in characters.
///
/// Tokens are right-space-padded to this width; a longer token is rejected
/// rather than truncated, since truncation would merge distinct values.
pub const TOKEN_WIDTH: usize = 32;

/// Default number of primary keys returned per lookup page.
pub const PAGE_SIZE: usize = 10;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, codecs, stores, or dispatch internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::Context,
        entity::{
            order::{OrderStatus, WorkOrder},
            receipt::{Receipt, ReceiptCreate, ReceiptUpdate},
            registry::{Registry, RegistryStatus},
            worker::{Worker, WorkerStatus},
        },
        ledger::{Ledger, MemLedger},
    };
}
