//! Work orders.
//!
//! A work order carries an opaque request payload from a requester to a
//! worker and, once completed, the worker's response payload. Work orders
//! are addressed by id only and carry no secondary index; interested
//! parties follow the submission and completion events.

use crate::{
    db::{Context, store},
    entity::API_VERSION,
    error::Error,
    ledger::Ledger,
};
use serde::{Deserialize, Serialize};

pub const KIND: &str = "order";

///
/// OrderStatus
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "u64", from = "u64")]
pub enum OrderStatus {
    Submitted = 1,
    Completed = 2,
}

impl From<OrderStatus> for u64 {
    fn from(status: OrderStatus) -> Self {
        status as Self
    }
}

impl From<u64> for OrderStatus {
    fn from(value: u64) -> Self {
        if value == 2 { Self::Completed } else { Self::Submitted }
    }
}

///
/// WorkOrder
///
/// One work order document, stored under `order:{workOrderId}`. Payloads are
/// opaque to Docket.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub work_order_id: String,
    pub worker_id: String,
    pub requester_id: String,
    pub work_order_request: String,
    pub work_order_response: String,
    pub error_code: u64,
    pub status: OrderStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmittedEvent<'a> {
    work_order_id: &'a str,
    worker_id: &'a str,
    requester_id: &'a str,
    work_order_request: &'a str,
    error_code: u64,
    sender_address: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletedEvent<'a> {
    work_order_id: &'a str,
    work_order_status: u64,
    work_order_response: &'a str,
    error_code: u64,
}

///
/// WorkOrderView
///
/// Retrieval projection: everything but the id the caller already has.
///

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderView {
    pub status: u64,
    pub worker_id: String,
    pub work_order_request: String,
    pub work_order_response: String,
    pub error_code: u64,
}

/// Submit a work order and announce it with the submitting identity and the
/// runtime API version.
pub fn submit<L: Ledger>(
    ctx: &mut Context<'_, L>,
    work_order_id: &str,
    worker_id: &str,
    requester_id: &str,
    work_order_request: &str,
) -> Result<(), Error> {
    let order = WorkOrder {
        work_order_id: work_order_id.to_string(),
        worker_id: worker_id.to_string(),
        requester_id: requester_id.to_string(),
        work_order_request: work_order_request.to_string(),
        work_order_response: String::new(),
        error_code: 0,
        status: OrderStatus::Submitted,
    };

    let sender = ctx.ledger.caller_identity();
    let event = store::encode(
        KIND,
        &SubmittedEvent {
            work_order_id,
            worker_id,
            requester_id,
            work_order_request,
            error_code: 0,
            sender_address: &sender,
            version: API_VERSION,
        },
    )?;

    store::save(ctx.ledger, KIND, work_order_id, &order)?;
    ctx.ledger.emit_event("workOrderSubmitted", event)?;

    Ok(())
}

/// Attach the worker's response and mark the order completed.
pub fn complete<L: Ledger>(
    ctx: &mut Context<'_, L>,
    work_order_id: &str,
    work_order_response: &str,
) -> Result<(), Error> {
    let mut order: WorkOrder = store::load(ctx.ledger, KIND, work_order_id)?;
    order.work_order_response = work_order_response.to_string();
    order.status = OrderStatus::Completed;

    let event = store::encode(
        KIND,
        &CompletedEvent {
            work_order_id,
            work_order_status: order.status.into(),
            work_order_response,
            error_code: order.error_code,
        },
    )?;

    store::save(ctx.ledger, KIND, work_order_id, &order)?;
    ctx.ledger.emit_event("workOrderCompleted", event)?;

    Ok(())
}

/// Serialized projection of one work order.
pub fn get<L: Ledger>(ctx: &mut Context<'_, L>, work_order_id: &str) -> Result<Vec<u8>, Error> {
    let order: WorkOrder = store::load(ctx.ledger, KIND, work_order_id)?;
    let view = WorkOrderView {
        status: order.status.into(),
        worker_id: order.worker_id,
        work_order_request: order.work_order_request,
        work_order_response: order.work_order_response,
        error_code: order.error_code,
    };
    store::encode(KIND, &view)
}
