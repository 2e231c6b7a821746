//! Attribute encoding for composite index keys.
//!
//! Attribute values are encoded into fixed-width strings whose lexicographic
//! order matches the intended scan order, so concatenating encoded attributes
//! yields a prefix-scannable key. Indexes are write-only lookup aids: there
//! is no decoder, and none is needed.

mod attr;
mod composite;

#[cfg(test)]
mod tests;

pub use attr::{AttrCodec, EncodeError};
pub use composite::{CompositeKey, attribute_segments, composite_prefix};
