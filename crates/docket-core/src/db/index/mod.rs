//! Secondary index maintenance.
//!
//! Each entity kind declares a static [`IndexModel`]: an ordered tuple of
//! attribute slots with their codecs. The slot order is part of the wire
//! contract: it determines what a caller can filter a *prefix* of. The
//! index is never the system of record: entries are derived from the primary
//! document and must be retracted with the pre-update attribute values
//! before fresh entries are written for the post-update values.


use crate::{
    codec::{AttrCodec, CompositeKey, EncodeError},
    ledger::Ledger,
    obs,
};
use thiserror::Error as ThisError;

///
/// IndexSlot
///
/// One attribute position in an index key.
///

#[derive(Clone, Copy, Debug)]
pub struct IndexSlot {
    pub name: &'static str,
    pub codec: AttrCodec,
}

///
/// IndexModel
///
/// Fixed key layout for one entity kind's index namespace.
///

#[derive(Clone, Copy, Debug)]
pub struct IndexModel {
    pub tag: &'static str,
    pub slots: &'static [IndexSlot],
}

impl IndexModel {
    /// Encode one complete indexable attribute combination into its entry
    /// key. `attrs` must supply every slot in declared order.
    ///
    /// Entry keys are computed *before* any write of the surrounding
    /// operation, so codec failures abort with nothing applied.
    pub fn entry_key(&self, attrs: &[&str]) -> Result<CompositeKey, EncodeError> {
        debug_assert_eq!(attrs.len(), self.slots.len(), "index '{}'", self.tag);

        let mut encoded = Vec::with_capacity(attrs.len());
        for (slot, raw) in self.slots.iter().zip(attrs) {
            encoded.push(slot.codec.encode(raw)?);
        }

        Ok(CompositeKey::new(self.tag, &encoded))
    }
}

/// Write one derived entry. `value` is the primary key of the entity the
/// entry refers to (or, for the update log, the serialized log entry).
pub fn write_entry<L: Ledger>(
    ledger: &mut L,
    tag: &'static str,
    key: &CompositeKey,
    value: &[u8],
) -> Result<(), IndexWriteError> {
    ledger
        .put_state(key.as_str(), value.to_vec())
        .map_err(|err| IndexWriteError::Insert {
            tag,
            message: err.to_string(),
        })?;
    obs::record_index_write();
    Ok(())
}

/// Retract one stale entry. A failed retract is fatal to the invocation:
/// proceeding would leave the primary record and the index in disagreement.
pub fn remove_entry<L: Ledger>(
    ledger: &mut L,
    tag: &'static str,
    key: &CompositeKey,
) -> Result<(), IndexWriteError> {
    ledger
        .delete_state(key.as_str())
        .map_err(|err| IndexWriteError::Retract {
            tag,
            message: err.to_string(),
        })?;
    obs::record_index_retract();
    Ok(())
}

///
/// IndexWriteError
///
/// A derived-entry write or delete failed after the primary write succeeded.
/// Never swallowed; the invocation reports failure to the caller.
///

#[derive(Debug, ThisError)]
pub enum IndexWriteError {
    #[error("failed to insert index entry in '{tag}': {message}")]
    Insert { tag: &'static str, message: String },

    #[error("failed to retract index entry in '{tag}': {message}")]
    Retract { tag: &'static str, message: String },
}
