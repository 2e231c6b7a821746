//! Runtime telemetry counters.
//!
//! Record-store logic does not inspect these; they exist for embedding
//! surfaces and tests. Counters are thread-local so concurrent test runs do
//! not bleed into each other, and they carry no request state.


use std::cell::RefCell;

thread_local! {
    static COUNTERS: RefCell<MetricsSnapshot> = RefCell::new(MetricsSnapshot::default());
}

///
/// MetricsSnapshot
///
/// Point-in-time view of the invocation counters.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MetricsSnapshot {
    pub index_writes: u64,
    pub index_retractions: u64,
    pub lookups: u64,
    pub entries_scanned: u64,
    pub documents_loaded: u64,
    pub documents_saved: u64,
}

/// Snapshot the counters for this thread.
#[must_use]
pub fn snapshot() -> MetricsSnapshot {
    COUNTERS.with(|c| *c.borrow())
}

/// Reset the counters for this thread.
pub fn reset() {
    COUNTERS.with(|c| *c.borrow_mut() = MetricsSnapshot::default());
}

pub(crate) fn record_index_write() {
    COUNTERS.with(|c| c.borrow_mut().index_writes += 1);
}

pub(crate) fn record_index_retract() {
    COUNTERS.with(|c| c.borrow_mut().index_retractions += 1);
}

pub(crate) fn record_lookup(entries_scanned: u64) {
    COUNTERS.with(|c| {
        let mut counters = c.borrow_mut();
        counters.lookups += 1;
        counters.entries_scanned += entries_scanned;
    });
}

pub(crate) fn record_document_load() {
    COUNTERS.with(|c| c.borrow_mut().documents_loaded += 1);
}

pub(crate) fn record_document_save() {
    COUNTERS.with(|c| c.borrow_mut().documents_saved += 1);
}
