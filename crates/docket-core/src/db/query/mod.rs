//! Paginated prefix lookups over an index namespace.
//!
//! A filter supplies a positional prefix of the index's slot order; numeric
//! zero and the empty token are wildcards. The scan prefix extends to the
//! first wildcard; any later non-wildcard attribute is enforced per scanned
//! entry. The underlying scan overfetches by one entry so "more available"
//! is detectable without a second round trip, and the returned cursor is the
//! key of the first unconsumed raw entry; forwarding it yields every match
//! exactly once, in stable order, across independent invocations.


use crate::{
    codec::{attribute_segments, composite_prefix},
    db::{Context, index::IndexModel},
    error::Error,
    ledger::Ledger,
    obs,
};
use serde::Serialize;

///
/// LookupPage
///
/// One page of primary keys. `total_scanned` counts raw entries fetched from
/// the ledger for this call (at most page size + 1), not matches. An empty
/// `cursor` means the scan is exhausted.
///

#[derive(Clone, Debug)]
pub struct LookupPage {
    pub ids: Vec<String>,
    pub total_scanned: u64,
    pub cursor: String,
}

///
/// LookupResponse
///
/// Wire projection of a [`LookupPage`], shared by every entity kind.
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub total_count: u64,
    pub lookup_tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
}

impl From<LookupPage> for LookupResponse {
    fn from(page: LookupPage) -> Self {
        Self {
            total_count: page.total_scanned,
            lookup_tag: page.cursor,
            ids: page.ids,
        }
    }
}

/// Run one page of a prefix lookup against `model`'s namespace.
///
/// `filter` supplies raw values for a leading subset of the slots; missing
/// trailing slots are unconstrained. An empty `cursor` starts the scan.
pub fn lookup<L: Ledger>(
    ctx: &mut Context<'_, L>,
    model: &IndexModel,
    filter: &[String],
    cursor: &str,
) -> Result<LookupPage, Error> {
    debug_assert!(
        filter.len() <= model.slots.len(),
        "filter exceeds slot count of index '{}'",
        model.tag
    );

    // Classify every filter slot before touching the ledger: wildcard, or
    // its encoded constraint. Codec failures abort here.
    let mut constraints: Vec<Option<String>> = Vec::with_capacity(filter.len());
    for (slot, raw) in model.slots.iter().zip(filter) {
        if slot.codec.is_wildcard(raw)? {
            constraints.push(None);
        } else {
            constraints.push(Some(slot.codec.encode(raw)?));
        }
    }

    // The scan prefix stops at the first wildcard; constrained slots after
    // it become residual checks against each scanned entry key.
    let prefix_len = constraints
        .iter()
        .position(Option::is_none)
        .unwrap_or(constraints.len());
    let prefix_attrs: Vec<String> = constraints[..prefix_len]
        .iter()
        .map(|c| c.clone().unwrap_or_default())
        .collect();
    let residual: Vec<(usize, &str)> = constraints
        .iter()
        .enumerate()
        .skip(prefix_len)
        .filter_map(|(slot, c)| c.as_deref().map(|enc| (slot, enc)))
        .collect();

    let prefix = composite_prefix(model.tag, &prefix_attrs);
    let page_size = ctx.page_size();
    let page = ctx.ledger.scan_prefix(&prefix, page_size + 1, cursor)?;

    let mut ids = Vec::new();
    let mut next_cursor = String::new();
    for (position, entry) in page.entries.iter().enumerate() {
        if position == page_size {
            // Overfetched sentinel: resume here on the next call.
            next_cursor = entry.key.clone();
            break;
        }
        if residual_matches(&entry.key, model.tag, &residual) {
            ids.push(String::from_utf8_lossy(&entry.value).into_owned());
        }
    }

    obs::record_lookup(page.fetched);

    Ok(LookupPage {
        ids,
        total_scanned: page.fetched,
        cursor: next_cursor,
    })
}

fn residual_matches(key: &str, tag: &str, residual: &[(usize, &str)]) -> bool {
    if residual.is_empty() {
        return true;
    }
    let Some(segments) = attribute_segments(key, tag) else {
        return false;
    };
    residual
        .iter()
        .all(|(slot, encoded)| segments.get(*slot).is_some_and(|seg| seg == encoded))
}
