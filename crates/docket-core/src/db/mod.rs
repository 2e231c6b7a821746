//! Record-store machinery: request context, secondary index maintenance,
//! paginated lookups, and document CRUD over the ledger seam.

pub mod index;
pub mod query;
pub mod store;

use crate::{PAGE_SIZE, ledger::Ledger};

///
/// Context
///
/// Request-scoped handle threaded explicitly through every operation: the
/// ledger for this invocation plus lookup paging configuration. There is no
/// process-wide client or logger state.
///

pub struct Context<'a, L: Ledger> {
    pub(crate) ledger: &'a mut L,
    page_size: usize,
}

impl<'a, L: Ledger> Context<'a, L> {
    #[must_use]
    pub fn new(ledger: &'a mut L) -> Self {
        Self {
            ledger,
            page_size: PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(ledger: &'a mut L, page_size: usize) -> Self {
        Self { ledger, page_size }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Direct access to the underlying ledger.
    pub fn ledger(&mut self) -> &mut L {
        self.ledger
    }
}
