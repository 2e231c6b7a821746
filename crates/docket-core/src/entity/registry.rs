//! Organization registries.
//!
//! A registry record announces an organization's endpoint and the
//! application types it serves. Each application type produces one entry in
//! the `org.app` index, so a lookup by application type finds every
//! organization serving it.

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

pub const KIND: &str = "registry";

/// Index layout: filterable by application type, disambiguated by owner.
pub const APP_INDEX: IndexModel = IndexModel {
    tag: "org.app",
    slots: &[
        IndexSlot {
            name: "appTypeId",
            codec: AttrCodec::TOKEN,
        },
        IndexSlot {
            name: "orgId",
            codec: AttrCodec::TOKEN,
        },
    ],
};

///
/// RegistryStatus
///
/// Lifecycle of an organization entry. Records are never deleted; an
/// organization leaves the pool by status change.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum RegistryStatus {
    Active = 1,
    Offline = 2,
    Decommissioned = 3,
}

impl From<RegistryStatus> for u64 {
    fn from(status: RegistryStatus) -> Self {
        status as Self
    }
}

impl TryFrom<u64> for RegistryStatus {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Active),
            2 => Ok(Self::Offline),
            3 => Ok(Self::Decommissioned),
            value => Err(ValidationError::UnknownStatus { value }),
        }
    }
}

///
/// Registry
///
/// One organization record, stored as a JSON document under
/// `registry:{orgId}`.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    pub org_id: String,
    pub uri: String,
    pub sc_addr: String,
    pub app_type_ids: Vec<String>,
    pub status: RegistryStatus,
}

/// Record a new organization. A repeated `add` for the same `orgId` replaces
/// the document but leaves prior index entries for dropped application
/// types behind; callers that mutate an existing organization use
/// [`update`].
pub fn add<L: Ledger>(
    ctx: &mut Context<'_, L>,
    org_id: &str,
    uri: &str,
    sc_addr: &str,
    app_type_ids: Vec<String>,
) -> Result<(), Error> {
    let registry = Registry {
        org_id: org_id.to_string(),
        uri: uri.to_string(),
        sc_addr: sc_addr.to_string(),
        app_type_ids,
        status: RegistryStatus::Active,
    };

    let entries = entry_keys(&registry)?;
    store::save(ctx.ledger, KIND, org_id, &registry)?;
    for key in &entries {
        index::write_entry(ctx.ledger, APP_INDEX.tag, key, org_id.as_bytes())?;
    }

    Ok(())
}

/// Replace an existing organization's endpoint and application types,
/// keeping its status. Index entries derived from the previous application
/// types are retracted before the new ones are written.
pub fn update<L: Ledger>(
    ctx: &mut Context<'_, L>,
    org_id: &str,
    uri: &str,
    sc_addr: &str,
    app_type_ids: Vec<String>,
) -> Result<(), Error> {
    let previous: Registry = store::load(ctx.ledger, KIND, org_id)?;

    let registry = Registry {
        org_id: org_id.to_string(),
        uri: uri.to_string(),
        sc_addr: sc_addr.to_string(),
        app_type_ids,
        status: previous.status,
    };

    let stale = entry_keys(&previous)?;
    let fresh = entry_keys(&registry)?;

    store::save(ctx.ledger, KIND, org_id, &registry)?;
    for key in &stale {
        index::remove_entry(ctx.ledger, APP_INDEX.tag, key)?;
    }
    for key in &fresh {
        index::write_entry(ctx.ledger, APP_INDEX.tag, key, org_id.as_bytes())?;
    }

    Ok(())
}

/// Set the organization's lifecycle status. Status is not indexed, so no
/// derived entries change.
pub fn set_status<L: Ledger>(
    ctx: &mut Context<'_, L>,
    org_id: &str,
    status: RegistryStatus,
) -> Result<Vec<u8>, Error> {
    let mut registry: Registry = store::load(ctx.ledger, KIND, org_id)?;
    registry.status = status;
    store::save(ctx.ledger, KIND, org_id, &registry)
}

/// One page of organization ids serving `app_type_id`. An empty
/// `app_type_id` matches every organization.
pub fn lookup<L: Ledger>(
    ctx: &mut Context<'_, L>,
    app_type_id: &str,
    cursor: &str,
) -> Result<LookupPage, Error> {
    query::lookup(ctx, &APP_INDEX, &[app_type_id.to_string()], cursor)
}

/// Serialized document for one organization.
pub fn retrieve<L: Ledger>(ctx: &mut Context<'_, L>, org_id: &str) -> Result<Vec<u8>, Error> {
    let registry: Registry = store::load(ctx.ledger, KIND, org_id)?;
    store::encode(KIND, &registry)
}

fn entry_keys(registry: &Registry) -> Result<Vec<CompositeKey>, Error> {
    let mut keys = Vec::with_capacity(registry.app_type_ids.len());
    for app_type_id in &registry.app_type_ids {
        keys.push(APP_INDEX.entry_key(&[app_type_id, &registry.org_id])?);
    }
    Ok(keys)
}
