//! Entity kinds of the work-assignment ledger.
//!
//! Four kinds, each with its own primary-key namespace and (except work
//! orders) a declared index layout: organization registries, workers, work
//! orders, and delivery receipts.

pub mod order;
pub mod receipt;
pub mod registry;
pub mod worker;


/// API version stamped into submission events.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
