//! Primary-record CRUD.
//!
//! Entity records are self-describing JSON documents stored under `kind:id`
//! data keys. Data keys never start with a control character, so they can
//! never collide with the NUL-prefixed composite index namespace. Records
//! are never physically deleted; decommissioning is a status value.


use crate::{
    error::Error,
    ledger::Ledger,
    obs,
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

/// Primary data key for one entity instance.
#[must_use]
pub fn data_key(kind: &'static str, id: &str) -> String {
    format!("{kind}:{id}")
}

/// Load and decode the record stored under `kind:id`.
pub fn load<L: Ledger, T: DeserializeOwned>(
    ledger: &L,
    kind: &'static str,
    id: &str,
) -> Result<T, Error> {
    let Some(bytes) = ledger.get_state(&data_key(kind, id))? else {
        return Err(NotFoundError::Record {
            kind,
            id: id.to_string(),
        }
        .into());
    };

    let record = serde_json::from_slice(&bytes).map_err(|err| SerializeError::Decode {
        kind,
        message: err.to_string(),
    })?;
    obs::record_document_load();

    Ok(record)
}

/// Encode and persist `record` under `kind:id`, replacing any previous
/// value. Returns the serialized document so callers can reuse it as a
/// response body.
pub fn save<L: Ledger, T: Serialize>(
    ledger: &mut L,
    kind: &'static str,
    id: &str,
    record: &T,
) -> Result<Vec<u8>, Error> {
    let bytes = encode(kind, record)?;
    ledger.put_state(&data_key(kind, id), bytes.clone())?;
    obs::record_document_save();

    Ok(bytes)
}

/// Encode a document without persisting it (responses, event payloads,
/// index-entry values). Performed before the first write of an operation.
pub fn encode<T: Serialize>(kind: &'static str, record: &T) -> Result<Vec<u8>, Error> {
    let bytes = serde_json::to_vec(record).map_err(|err| SerializeError::Encode {
        kind,
        message: err.to_string(),
    })?;
    Ok(bytes)
}

///
/// NotFoundError
///
/// The addressed record (or log position) does not exist. Never partially
/// applies a mutation.
///

#[derive(Debug, ThisError)]
pub enum NotFoundError {
    #[error("{kind} '{id}' does not exist")]
    Record { kind: &'static str, id: String },

    #[error("receipt '{id}' has no recorded updates")]
    EmptyUpdateLog { id: String },

    #[error("no update matches the requested position and updater")]
    NoMatchingUpdate,
}

///
/// SerializeError
///
/// A document failed to encode or decode. Decode failures indicate a
/// corrupted or foreign value under a Docket data key.
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("could not encode {kind} document: {message}")]
    Encode { kind: &'static str, message: String },

    #[error("could not decode {kind} document: {message}")]
    Decode { kind: &'static str, message: String },
}
