//! ## Crate layout
//! - `core::codec`: fixed-width attribute encoding and composite index keys.
//! - `core::ledger`: the [`Ledger`] trait and the in-memory implementation.
//! - `core::db`: index maintenance, paginated lookups, and document CRUD.
//! - `core::entity`: registries, workers, work orders, and receipts.
//! - `core::dispatch`: the positional wire surface.
//!
//! The `prelude` module mirrors the surface embedding code uses day to day.

pub use docket_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use docket_core::{
    PAGE_SIZE,
    db::Context,
    dispatch::dispatch,
    error::Error,
    ledger::{Ledger, MemLedger},
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::core::{dispatch::dispatch, error::Error};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    // Smoke test over the re-exported surface.
    #[test]
    fn dispatch_is_reachable_through_the_facade() {
        let mut ledger = MemLedger::new();
        let mut ctx = Context::new(&mut ledger);

        let args: Vec<String> = ["orgA", "uri", "addr", "app1"]
            .iter()
            .map(|a| (*a).to_string())
            .collect();
        dispatch(&mut ctx, "registryAdd", &args).unwrap();

        let body = dispatch(&mut ctx, "registryLookUp", &["app1".to_string()]).unwrap();
        let found: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(found["ids"], serde_json::json!(["orgA"]));
    }
}
