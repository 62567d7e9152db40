use std::collections::HashMap;

/// Resolved `KEY=VALUE` pairs from a single parse.
///
/// Iteration order is unspecified, and value resolution deliberately runs in
/// that unspecified order (see the crate docs on expansion).
pub type EnvMap = HashMap<String, String>;

/// Quoting style of a raw value, derived from its first and last characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Wrapped in `"`: escape sequences are decoded, variables expanded.
    Double,
    /// Wrapped in `'`: the content is literal, no decoding or expansion.
    Single,
    /// Not wrapped: variables are expanded, no escape decoding.
    None,
}

impl QuoteStyle {
    /// Classifies a raw value. Requires length >= 2 and matching end quotes;
    /// a lone `"` or `'` is `None` since one character cannot both open and
    /// close the quote.
    pub fn classify(value: &str) -> Self {
        let bytes = value.as_bytes();
        if bytes.len() < 2 {
            return QuoteStyle::None;
        }
        match (bytes[0], bytes[bytes.len() - 1]) {
            (b'"', b'"') => QuoteStyle::Double,
            (b'\'', b'\'') => QuoteStyle::Single,
            _ => QuoteStyle::None,
        }
    }
}

/// Strips one layer of matching surrounding quotes, if present.
pub(crate) fn strip_quotes(value: &str) -> &str {
    match QuoteStyle::classify(value) {
        QuoteStyle::Double | QuoteStyle::Single => &value[1..value.len() - 1],
        QuoteStyle::None => value,
    }
}

/// Summary of a load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Variables written to the target environment.
    pub loaded: usize,
    /// Variables left untouched because the target already defined them.
    pub skipped_existing: usize,
}
