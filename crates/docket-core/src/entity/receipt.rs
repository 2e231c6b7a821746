//! Delivery receipts and their update log.
//!
//! A receipt is created once per work order and then accumulates an ordered,
//! append-only list of updates. Update positions are 1-based and dense; an
//! entry is never reordered, rewritten, or truncated. Every append also
//! writes one `receipt.update` index entry keyed by work order, updater, and
//! position, valued with the serialized update itself, so point retrieval is
//! a key scan rather than a document walk.

use crate::{
    codec::{AttrCodec, CompositeKey},
    db::{
        Context,
        index::{self, IndexModel, IndexSlot},
        query::{self, LookupPage},
        store,
    },
    error::{Error, ValidationError},
    ledger::Ledger,
};
use serde::{Deserialize, Serialize};

pub const KIND: &str = "receipt";

/// Receipt status codes. 5 through 254 are reserved.
pub const STATUS_PENDING: u64 = 0;
pub const STATUS_COMPLETED: u64 = 1;
pub const STATUS_PROCESSED: u64 = 2;
pub const STATUS_FAILED: u64 = 3;
pub const STATUS_REJECTED: u64 = 4;

/// Filter wildcard: match receipts in any status. Storable as a status
/// value; treated as "unconstrained" only in lookup filters.
pub const STATUS_ANY: u64 = 255;

/// Retrieval sentinel addressing the last update in the log. Never
/// storable: appending an update with a type at or above this value is a
/// validation error.
pub const UPDATE_INDEX_LATEST: u64 = 256;

/// Index layout for receipt creation records.
pub const CREATED_INDEX: IndexModel = IndexModel {
    tag: "receipt.created",
    slots: &[
        IndexSlot {
            name: "workerServiceId",
            codec: AttrCodec::TOKEN,
        },
        IndexSlot {
            name: "workerId",
            codec: AttrCodec::TOKEN,
        },
        IndexSlot {
            name: "requesterId",
            codec: AttrCodec::TOKEN,
        },
        IndexSlot {
            name: "createStatus",
            codec: AttrCodec::NUMERIC,
        },
    ],
};

/// Index layout for update-log positions. The sequence slot is 1-based, so
/// the numeric wildcard never collides with a stored position.
pub const UPDATE_INDEX: IndexModel = IndexModel {
    tag: "receipt.update",
    slots: &[
        IndexSlot {
            name: "workOrderId",
            codec: AttrCodec::TOKEN,
        },
        IndexSlot {
            name: "updaterId",
            codec: AttrCodec::TOKEN,
        },
        IndexSlot {
            name: "updateSeq",
            codec: AttrCodec::NUMERIC,
        },
    ],
};

///
/// ReceiptCreate
///
/// The immutable creation record of a receipt.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptCreate {
    pub work_order_id: String,
    pub worker_id: String,
    pub worker_service_id: String,
    pub requester_id: String,
    pub receipt_create_status: u64,
    pub work_order_request_hash: String,
}

///
/// ReceiptUpdate
///
/// One appended update. Data and signature fields are opaque to Docket.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptUpdate {
    pub updater_id: String,
    pub update_type: u64,
    pub update_data: String,
    pub update_signature: String,
    pub signature_rules: String,
}

///
/// Receipt
///
/// The stored document: creation record plus the update log, under
/// `receipt:{workOrderId}`.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Receipt {
    #[serde(flatten)]
    pub create: ReceiptCreate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updates: Vec<ReceiptUpdate>,
}

///
/// ReceiptUpdateView
///
/// Retrieval projection of one update: the entry fields plus the total log
/// length at read time.
///

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptUpdateView<'a> {
    #[serde(flatten)]
    update: &'a ReceiptUpdate,
    update_count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedEvent<'a> {
    work_order_id: &'a str,
    update_index: u64,
    #[serde(flatten)]
    update: &'a ReceiptUpdate,
}

/// Create a receipt and its creation-index entry.
///
/// The creation-index status slot reflects the status at creation time;
/// later log appends do not rewrite it.
pub fn create<L: Ledger>(ctx: &mut Context<'_, L>, create: ReceiptCreate) -> Result<(), Error> {
    let receipt = Receipt {
        create,
        updates: Vec::new(),
    };

    let entry = created_entry_key(&receipt.create)?;
    let document = store::save(ctx.ledger, KIND, &receipt.create.work_order_id, &receipt)?;
    index::write_entry(
        ctx.ledger,
        CREATED_INDEX.tag,
        &entry,
        receipt.create.work_order_id.as_bytes(),
    )?;
    ctx.ledger.emit_event("workOrderReceiptCreated", document)?;

    Ok(())
}

/// Append one update to the receipt's log.
///
/// The new entry's position is the log length after the append; positions
/// are therefore 1-based and dense.
pub fn update<L: Ledger>(
    ctx: &mut Context<'_, L>,
    work_order_id: &str,
    update: ReceiptUpdate,
) -> Result<(), Error> {
    if update.update_type >= UPDATE_INDEX_LATEST {
        return Err(ValidationError::ReservedUpdateType {
            value: update.update_type,
        }
        .into());
    }

    let mut receipt: Receipt = store::load(ctx.ledger, KIND, work_order_id)?;
    let seq = receipt.updates.len() as u64 + 1;

    let entry = UPDATE_INDEX.entry_key(&[work_order_id, &update.updater_id, &seq.to_string()])?;
    let serialized = store::encode(KIND, &update)?;
    let event = store::encode(
        KIND,
        &UpdatedEvent {
            work_order_id,
            update_index: seq,
            update: &update,
        },
    )?;

    receipt.updates.push(update);
    store::save(ctx.ledger, KIND, work_order_id, &receipt)?;
    index::write_entry(ctx.ledger, UPDATE_INDEX.tag, &entry, &serialized)?;
    ctx.ledger.emit_event("workOrderReceiptUpdated", event)?;

    Ok(())
}

/// One page of work-order ids whose receipts match the creation filter.
/// Empty tokens are wildcards; status [`STATUS_ANY`] (or 0) matches every
/// status.
pub fn lookup<L: Ledger>(
    ctx: &mut Context<'_, L>,
    worker_service_id: &str,
    worker_id: &str,
    requester_id: &str,
    receipt_status: &str,
    cursor: &str,
) -> Result<LookupPage, Error> {
    // The "any status" code maps onto the numeric wildcard before the codec
    // sees it.
    let status = if receipt_status.parse::<u64>().is_ok_and(|v| v == STATUS_ANY) {
        "0".to_string()
    } else {
        receipt_status.to_string()
    };

    let filter = [
        worker_service_id.to_string(),
        worker_id.to_string(),
        requester_id.to_string(),
        status,
    ];
    query::lookup(ctx, &CREATED_INDEX, &filter, cursor)
}

/// Serialized creation record of one receipt. Updates are retrieved through
/// [`update_retrieve`].
pub fn retrieve<L: Ledger>(
    ctx: &mut Context<'_, L>,
    work_order_id: &str,
) -> Result<Vec<u8>, Error> {
    let receipt: Receipt = store::load(ctx.ledger, KIND, work_order_id)?;
    store::encode(KIND, &receipt.create)
}

/// Retrieve one update from a receipt's log, with the log length at read
/// time as `updateCount`.
///
/// `update_index` [`UPDATE_INDEX_LATEST`] addresses the last entry only: a
/// non-empty `updater_id` that differs from the last entry's updater is "no
/// match", never an earlier entry. Any other position resolves through the
/// update index; position 0 is rejected since the log is 1-based.
pub fn update_retrieve<L: Ledger>(
    ctx: &mut Context<'_, L>,
    work_order_id: &str,
    updater_id: &str,
    update_index: u64,
) -> Result<Vec<u8>, Error> {
    if update_index == 0 {
        return Err(ValidationError::ZeroUpdateIndex.into());
    }

    let receipt: Receipt = store::load(ctx.ledger, KIND, work_order_id)?;
    let update_count = receipt.updates.len() as u64;

    if update_index == UPDATE_INDEX_LATEST {
        let Some(latest) = receipt.updates.last() else {
            return Err(store::NotFoundError::EmptyUpdateLog {
                id: work_order_id.to_string(),
            }
            .into());
        };
        if !updater_id.is_empty() && latest.updater_id != updater_id {
            return Err(store::NotFoundError::NoMatchingUpdate.into());
        }
        return store::encode(
            KIND,
            &ReceiptUpdateView {
                update: latest,
                update_count,
            },
        );
    }

    let filter = [
        work_order_id.to_string(),
        updater_id.to_string(),
        update_index.to_string(),
    ];

    // A wildcard updater leaves only the work-order id in the scan prefix,
    // so the position may sit past the first scan page. The continuation
    // stays internal; no cursor is exposed on this path.
    let mut cursor = String::new();
    let raw = loop {
        let page = query::lookup(ctx, &UPDATE_INDEX, &filter, &cursor)?;
        if let Some(first) = page.ids.into_iter().next() {
            break first;
        }
        if page.cursor.is_empty() {
            return Err(store::NotFoundError::NoMatchingUpdate.into());
        }
        cursor = page.cursor;
    };

    let update: ReceiptUpdate =
        serde_json::from_slice(raw.as_bytes()).map_err(|err| store::SerializeError::Decode {
            kind: KIND,
            message: err.to_string(),
        })?;
    store::encode(
        KIND,
        &ReceiptUpdateView {
            update: &update,
            update_count,
        },
    )
}

fn created_entry_key(create: &ReceiptCreate) -> Result<CompositeKey, Error> {
    Ok(CREATED_INDEX.entry_key(&[
        &create.worker_service_id,
        &create.worker_id,
        &create.requester_id,
        &create.receipt_create_status.to_string(),
    ])?)
}
