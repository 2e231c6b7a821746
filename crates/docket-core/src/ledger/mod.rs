//! The ledger seam.
//!
//! Docket never owns storage: every read and write goes through [`Ledger`],
//! implemented by the surrounding runtime. The runtime is trusted to
//! serialize per-key execution and to commit one invocation's writes
//! atomically; Docket's only obligation is to order its writes sensibly and
//! to finish all fallible validation before the first one.

mod memory;

#[cfg(test)]
mod tests;

pub use memory::{EmittedEvent, MemLedger};

use thiserror::Error as ThisError;

///
/// Ledger
///
/// Key-value state, prefix scans, event emission, and caller identity as
/// provided by the execution environment.
///

pub trait Ledger {
    /// Read the value stored under `key`, if any.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Write `value` under `key`, silently replacing any previous value.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError>;

    /// Delete the value stored under `key`. Deleting an absent key is not an
    /// error.
    fn delete_state(&mut self, key: &str) -> Result<(), StateError>;

    /// Scan up to `limit` entries whose key starts with `prefix`, in key
    /// order, starting from the opaque `resume` token returned by a previous
    /// scan (empty token = start of the prefix range).
    fn scan_prefix(&self, prefix: &str, limit: usize, resume: &str) -> Result<ScanPage, StateError>;

    /// Emit a named event payload onto the external event channel.
    fn emit_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), StateError>;

    /// Opaque descriptor of the principal driving this invocation.
    fn caller_identity(&self) -> String;
}

///
/// ScanPage
///
/// One bounded page of a prefix scan. `fetched` is the raw number of entries
/// the backend returned for this call.
///

#[derive(Clone, Debug, Default)]
pub struct ScanPage {
    pub entries: Vec<ScanEntry>,
    pub fetched: u64,
}

///
/// ScanEntry
///

#[derive(Clone, Debug)]
pub struct ScanEntry {
    pub key: String,
    pub value: Vec<u8>,
}

///
/// StateError
///
/// Backend failure surfaced by a [`Ledger`] implementation. Docket never
/// retries these; the external caller re-issues the invocation if it wants
/// to.
///

#[derive(Debug, ThisError)]
#[error("ledger backend failure: {message}")]
pub struct StateError {
    pub message: String,
}

impl StateError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
