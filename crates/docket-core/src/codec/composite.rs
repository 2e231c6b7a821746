use derive_more::{Deref, Display};

/// Separator between the type tag and each encoded attribute.
///
/// The leading NUL also keeps the whole index namespace disjoint from data
/// keys, which never start with a control character.
pub(crate) const DELIMITER: char = '\u{0}';

///
/// CompositeKey
///
/// Fully-qualified index-entry key: type tag plus every encoded attribute of
/// one indexable combination. Byte order of the rendered string must match
/// intended scan order; fixed-width attribute encoding guarantees it.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Assemble a complete entry key from already-encoded attributes.
    #[must_use]
    pub fn new(tag: &str, encoded: &[String]) -> Self {
        Self(render(tag, encoded))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Scan prefix covering every entry key whose leading attributes equal
/// `encoded`. An empty slice covers the whole tag namespace.
#[must_use]
pub fn composite_prefix(tag: &str, encoded: &[String]) -> String {
    render(tag, encoded)
}

/// Split an entry key back into its encoded attribute segments.
///
/// Returns `None` when the key does not belong to `tag`. Used for residual
/// filter matching; this is segment recovery, not value decoding.
#[must_use]
pub fn attribute_segments<'a>(key: &'a str, tag: &str) -> Option<Vec<&'a str>> {
    let mut namespace = String::with_capacity(tag.len() + 2);
    namespace.push(DELIMITER);
    namespace.push_str(tag);
    namespace.push(DELIMITER);

    let rest = key.strip_prefix(namespace.as_str())?;
    Some(rest.split_terminator(DELIMITER).collect())
}

fn render(tag: &str, encoded: &[String]) -> String {
    let mut out = String::with_capacity(2 + tag.len() + encoded.len() * 2);
    out.push(DELIMITER);
    out.push_str(tag);
    out.push(DELIMITER);
    for attr in encoded {
        out.push_str(attr);
        out.push(DELIMITER);
    }
    out
}
