use crate::error::{EscapeError, ParseError};
use crate::expand::expand_vars;
use crate::model::{EnvMap, QuoteStyle, strip_quotes};

/// Resolves every raw value in the map in place.
///
/// Double-quoted values are unquoted, escape-decoded, and expanded;
/// single-quoted values are unquoted and kept literal; unquoted values
/// are expanded as-is. Entries are visited in the map's unspecified
/// iteration order, and expansion reads whatever state the map holds at
/// that moment, so multi-level reference chains may resolve only
/// partially. A decode failure aborts the whole pass.
pub(crate) fn resolve_values(vars: &mut EnvMap) -> Result<(), ParseError> {
    let keys: Vec<String> = vars.keys().cloned().collect();

    for key in keys {
        let Some(raw) = vars.get(&key).cloned() else {
            continue;
        };

        let resolved = match QuoteStyle::classify(&raw) {
            QuoteStyle::Double => {
                let decoded =
                    decode_escapes(strip_quotes(&raw)).map_err(|source| ParseError::Escape {
                        key: key.clone(),
                        value: raw.clone(),
                        source,
                    })?;
                expand_vars(&decoded, vars)
            }
            QuoteStyle::Single => strip_quotes(&raw).to_owned(),
            QuoteStyle::None => expand_vars(&raw, vars),
        };

        vars.insert(key, resolved);
    }

    Ok(())
}

/// Decodes backslash escapes in the inner text of a double-quoted value.
///
/// Walks code points, not bytes, so multi-byte characters pass through
/// intact. `\$` is kept as the two-character marker for the expansion
/// step rather than collapsed here.
pub(crate) fn decode_escapes(input: &str) -> Result<String, EscapeError> {
    if !input.contains('\\') {
        return Ok(input.to_owned());
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().enumerate();

    while let Some((_, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let Some((position, escaped)) = chars.next() else {
            return Err(EscapeError::TrailingBackslash);
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '$' => out.push_str("\\$"),
            other => return Err(EscapeError::InvalidSequence { ch: other, position }),
        }
    }

    Ok(out)
}
