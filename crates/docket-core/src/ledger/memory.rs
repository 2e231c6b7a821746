use crate::ledger::{Ledger, ScanEntry, ScanPage, StateError};
use std::collections::BTreeMap;

///
/// MemLedger
///
/// BTreeMap-backed [`Ledger`] for tests and embedding. Emitted events are
/// recorded rather than delivered; the caller identity is configurable.
/// Scan resume tokens are entry keys, consumed inclusively.
///

#[derive(Debug, Default)]
pub struct MemLedger {
    state: BTreeMap<String, Vec<u8>>,
    events: Vec<EmittedEvent>,
    caller: String,
}

impl MemLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: BTreeMap::new(),
            events: Vec::new(),
            caller: "anonymous".to_string(),
        }
    }

    #[must_use]
    pub fn with_caller(caller: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            ..Self::new()
        }
    }

    /// Events emitted so far, in emission order.
    #[must_use]
    pub fn events(&self) -> &[EmittedEvent] {
        &self.events
    }

    /// Number of live state entries (primary records plus index entries).
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Count state entries under a key prefix (diagnostics only).
    #[must_use]
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.state
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .count()
    }
}

impl Ledger for MemLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        self.state.insert(key.to_string(), value);
        Ok(())
    }

    fn delete_state(&mut self, key: &str) -> Result<(), StateError> {
        self.state.remove(key);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str, limit: usize, resume: &str) -> Result<ScanPage, StateError> {
        let start = if resume.is_empty() { prefix } else { resume };
        if !start.starts_with(prefix) {
            return Err(StateError::new(format!(
                "resume token does not belong to the scanned prefix: {resume:?}"
            )));
        }

        let mut entries = Vec::new();
        for (key, value) in self.state.range(start.to_string()..) {
            if !key.starts_with(prefix) || entries.len() == limit {
                break;
            }
            entries.push(ScanEntry {
                key: key.clone(),
                value: value.clone(),
            });
        }

        let fetched = entries.len() as u64;
        Ok(ScanPage { entries, fetched })
    }

    fn emit_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), StateError> {
        self.events.push(EmittedEvent {
            name: name.to_string(),
            payload,
        });
        Ok(())
    }

    fn caller_identity(&self) -> String {
        self.caller.clone()
    }
}

///
/// EmittedEvent
///
/// One recorded notification payload.
///

#[derive(Clone, Debug)]
pub struct EmittedEvent {
    pub name: String,
    pub payload: Vec<u8>,
}

impl EmittedEvent {
    /// Decode the payload as a JSON value (test helper).
    #[must_use]
    pub fn payload_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.payload).unwrap_or(serde_json::Value::Null)
    }
}
