//! Worker records.
//!
//! A worker advertises the work it can take: a numeric worker type, the
//! owning organization, and the application types it handles. The
//! `worker.profile` index carries all three plus the worker id itself, so a
//! lookup can narrow by any leading combination of them.

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

pub const KIND: &str = "worker";

/// Index layout. One entry per application type the worker handles; the
/// trailing worker-id slot keeps entries for distinct workers distinct.
pub const PROFILE_INDEX: IndexModel = IndexModel {
    tag: "worker.profile",
    slots: &[
        IndexSlot {
            name: "workerType",
            codec: AttrCodec::NUMERIC,
        },
        IndexSlot {
            name: "organizationId",
            codec: AttrCodec::TOKEN,
        },
        IndexSlot {
            name: "applicationTypeId",
            codec: AttrCodec::TOKEN,
        },
        IndexSlot {
            name: "workerId",
            codec: AttrCodec::TOKEN,
        },
    ],
};

///
/// WorkerStatus
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum WorkerStatus {
    Active = 1,
    Offline = 2,
    Decommissioned = 3,
    Compromised = 4,
}

impl From<WorkerStatus> for u64 {
    fn from(status: WorkerStatus) -> Self {
        status as Self
    }
}

impl TryFrom<u64> for WorkerStatus {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Active),
            2 => Ok(Self::Offline),
            3 => Ok(Self::Decommissioned),
            4 => Ok(Self::Compromised),
            value => Err(ValidationError::UnknownStatus { value }),
        }
    }
}

///
/// Worker
///
/// One worker record, stored under `worker:{workerId}`. `details` is free
/// text owned by the worker runtime; Docket never interprets it.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub worker_id: String,
    pub worker_type: u64,
    pub organization_id: String,
    pub application_type_ids: Vec<String>,
    pub details: String,
    pub status: WorkerStatus,
}

#[derive(Serialize)]
struct WorkerRegisteredEvent<'a> {
    #[serde(rename = "workerID")]
    worker_id: &'a str,
}

/// Register a new worker, created Active, and announce it.
pub fn register<L: Ledger>(
    ctx: &mut Context<'_, L>,
    worker_id: &str,
    worker_type: u64,
    organization_id: &str,
    application_type_ids: Vec<String>,
    details: &str,
) -> Result<(), Error> {
    let worker = Worker {
        worker_id: worker_id.to_string(),
        worker_type,
        organization_id: organization_id.to_string(),
        application_type_ids,
        details: details.to_string(),
        status: WorkerStatus::Active,
    };

    let entries = entry_keys(&worker)?;
    let event = store::encode(KIND, &WorkerRegisteredEvent { worker_id })?;

    store::save(ctx.ledger, KIND, worker_id, &worker)?;
    for key in &entries {
        index::write_entry(ctx.ledger, PROFILE_INDEX.tag, key, worker_id.as_bytes())?;
    }
    ctx.ledger.emit_event("workerRegistered", event)?;

    Ok(())
}

/// Replace the worker's details. Details are not indexed, so no derived
/// entries change. Returns the updated document.
pub fn update<L: Ledger>(
    ctx: &mut Context<'_, L>,
    worker_id: &str,
    details: &str,
) -> Result<Vec<u8>, Error> {
    let mut worker: Worker = store::load(ctx.ledger, KIND, worker_id)?;
    worker.details = details.to_string();
    store::save(ctx.ledger, KIND, worker_id, &worker)
}

/// Set the worker's lifecycle status. Returns the updated document.
pub fn set_status<L: Ledger>(
    ctx: &mut Context<'_, L>,
    worker_id: &str,
    status: WorkerStatus,
) -> Result<Vec<u8>, Error> {
    let mut worker: Worker = store::load(ctx.ledger, KIND, worker_id)?;
    worker.status = status;
    store::save(ctx.ledger, KIND, worker_id, &worker)
}

/// One page of worker ids matching the profile filter. Worker type 0 and
/// empty tokens are wildcards.
pub fn lookup<L: Ledger>(
    ctx: &mut Context<'_, L>,
    worker_type: &str,
    organization_id: &str,
    application_type_id: &str,
    cursor: &str,
) -> Result<LookupPage, Error> {
    let filter = [
        worker_type.to_string(),
        organization_id.to_string(),
        application_type_id.to_string(),
    ];
    query::lookup(ctx, &PROFILE_INDEX, &filter, cursor)
}

/// Serialized document for one worker.
pub fn retrieve<L: Ledger>(ctx: &mut Context<'_, L>, worker_id: &str) -> Result<Vec<u8>, Error> {
    let worker: Worker = store::load(ctx.ledger, KIND, worker_id)?;
    store::encode(KIND, &worker)
}

fn entry_keys(worker: &Worker) -> Result<Vec<CompositeKey>, Error> {
    let worker_type = worker.worker_type.to_string();
    let mut keys = Vec::with_capacity(worker.application_type_ids.len());
    for app_type_id in &worker.application_type_ids {
        keys.push(PROFILE_INDEX.entry_key(&[
            &worker_type,
            &worker.organization_id,
            app_type_id,
            &worker.worker_id,
        ])?);
    }
    Ok(keys)
}
