use crate::{NUMERIC_WIDTH, TOKEN_WIDTH};
use thiserror::Error as ThisError;

///
/// AttrCodec
///
/// Per-slot encoding of one attribute value into fixed-width,
/// order-preserving text. Each index slot resolves its codec statically; the
/// codec never guesses from the value shape.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttrCodec {
    /// Zero-left-padded decimal. String order equals numeric order.
    Numeric { width: usize },

    /// Right-space-padded identifier. Fixed width keeps one value from ever
    /// being a prefix of another.
    Token { width: usize },
}

impl AttrCodec {
    pub const NUMERIC: Self = Self::Numeric {
        width: NUMERIC_WIDTH,
    };

    pub const TOKEN: Self = Self::Token { width: TOKEN_WIDTH };

    /// Encode a raw attribute value into its fixed-width form.
    pub fn encode(&self, raw: &str) -> Result<String, EncodeError> {
        match *self {
            Self::Numeric { width } => {
                let value = parse_numeric(raw)?;
                Ok(format!("{value:0width$}"))
            }
            Self::Token { width } => {
                if raw.contains(super::composite::DELIMITER) {
                    return Err(EncodeError::TokenHasSeparator);
                }
                let len = raw.chars().count();
                if len > width {
                    return Err(EncodeError::TokenTooLong { len, width });
                }
                Ok(format!("{raw:<width$}"))
            }
        }
    }

    /// Wildcard test for lookup filters, applied to the *raw* input value
    /// before padding: numeric zero and the empty token mean "do not
    /// constrain on this attribute".
    pub fn is_wildcard(&self, raw: &str) -> Result<bool, EncodeError> {
        match self {
            Self::Numeric { .. } => Ok(parse_numeric(raw)? == 0),
            Self::Token { .. } => Ok(raw.is_empty()),
        }
    }
}

fn parse_numeric(raw: &str) -> Result<u64, EncodeError> {
    raw.parse::<u64>().map_err(|_| EncodeError::NotNumeric {
        value: raw.to_string(),
    })
}

///
/// EncodeError
///
/// Codec failures for one attribute value. Always raised before the first
/// write of an invocation.
///

#[derive(Debug, ThisError)]
pub enum EncodeError {
    #[error("numeric attribute '{value}' is not a non-negative integer")]
    NotNumeric { value: String },

    #[error("token attribute is {len} characters, exceeding the fixed width {width}")]
    TokenTooLong { len: usize, width: usize },

    #[error("token attribute contains the composite-key separator character")]
    TokenHasSeparator,
}
