use crate::model::{EnvMap, strip_quotes};

/// Substitutes `$NAME` and `${NAME}` references using the given map.
///
/// Undefined names expand to the empty string. A referenced value is
/// substituted with any surrounding quotes stripped, since it may not
/// have been resolved yet. The decoder's `\$` marker is rewritten to
/// the `$$` form first, and `$$` substitutes a single literal `$`, so
/// escaped dollars come out literal. Expansion is a single pass: any
/// `$` in substituted text is emitted as-is, never re-expanded.
pub(crate) fn expand_vars(value: &str, vars: &EnvMap) -> String {
    if !value.contains('$') {
        return value.to_owned();
    }

    let rewritten = value.replace("\\$", "$$");
    let input = rewritten.as_str();
    let bytes = input.as_bytes();

    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut idx = 0;
    // All metacharacters are ASCII, so a byte cursor never splits a
    // multi-byte character and every slice boundary below is valid.
    while idx < bytes.len() {
        if bytes[idx] != b'$' || idx + 1 == bytes.len() {
            idx += 1;
            continue;
        }

        out.push_str(&input[copied..idx]);
        let (name, width) = shell_name(&input[idx + 1..]);
        if name.is_empty() && width > 0 {
            // Malformed brace syntax. Swallow it.
        } else if name.is_empty() {
            // A `$` not followed by a name stays literal.
            out.push('$');
        } else {
            out.push_str(lookup(name, vars));
        }
        idx += width + 1;
        copied = idx;
    }
    out.push_str(&input[copied..]);

    out
}

fn lookup<'m>(name: &str, vars: &'m EnvMap) -> &'m str {
    // `$$` parses as the special variable `$`. It stands for a literal
    // dollar sign here, completing the `\$` escape.
    if name == "$" {
        return "$";
    }
    match vars.get(name) {
        Some(value) => strip_quotes(value),
        None => "",
    }
}

/// Extracts the variable name starting right after a `$`.
///
/// Returns the name and the number of bytes consumed. The shell rules:
/// `{NAME}` takes everything up to the closing brace, a special
/// character or digit is a one-character name by itself, and otherwise
/// the name is the longest run of ASCII alphanumerics and `_`. An
/// empty name with a non-zero width marks bad brace syntax the caller
/// should swallow.
fn shell_name(s: &str) -> (&str, usize) {
    let bytes = s.as_bytes();
    match bytes.first() {
        None => ("", 0),
        Some(b'{') => {
            if bytes.len() > 2 && is_special_var(bytes[1]) && bytes[2] == b'}' {
                return (&s[1..2], 3);
            }
            for idx in 1..bytes.len() {
                if bytes[idx] == b'}' {
                    if idx == 1 {
                        // Bad syntax; eat "${}".
                        return ("", 2);
                    }
                    return (&s[1..idx], idx + 1);
                }
            }
            // Bad syntax; eat "${".
            ("", 1)
        }
        Some(&byte) if is_special_var(byte) => (&s[..1], 1),
        Some(_) => {
            let mut end = 0;
            while end < bytes.len() && is_name_byte(bytes[end]) {
                end += 1;
            }
            (&s[..end], end)
        }
    }
}

fn is_special_var(byte: u8) -> bool {
    matches!(byte, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-') || byte.is_ascii_digit()
}

fn is_name_byte(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn expands_bare_and_braced_names() {
        let vars = env(&[("HOME", "/root"), ("USER", "dev")]);
        assert_eq!(expand_vars("$HOME/bin", &vars), "/root/bin");
        assert_eq!(expand_vars("${HOME}/bin", &vars), "/root/bin");
        assert_eq!(expand_vars("$HOME-${USER}", &vars), "/root-dev");
    }

    #[test]
    fn name_ends_at_first_non_name_character() {
        let vars = env(&[("A", "foo")]);
        assert_eq!(expand_vars("$A-bar", &vars), "foo-bar");
        assert_eq!(expand_vars("$A.bar", &vars), "foo.bar");
        assert_eq!(expand_vars("x$A", &vars), "xfoo");
    }

    #[test]
    fn undefined_name_expands_to_empty() {
        let vars = env(&[]);
        assert_eq!(expand_vars("$MISSING-bar", &vars), "-bar");
        assert_eq!(expand_vars("${MISSING}", &vars), "");
    }

    #[test]
    fn underscore_and_digits_are_name_characters() {
        let vars = env(&[("MY_VAR2", "ok")]);
        assert_eq!(expand_vars("$MY_VAR2", &vars), "ok");
    }

    #[test]
    fn digit_after_dollar_is_a_one_character_name() {
        let vars = env(&[("1", "one")]);
        assert_eq!(expand_vars("$1st", &vars), "onest");
        assert_eq!(expand_vars("$9th", &vars), "th");
    }

    #[test]
    fn special_characters_are_one_character_names() {
        let vars = env(&[("?", "status")]);
        assert_eq!(expand_vars("$?", &vars), "status");
        assert_eq!(expand_vars("$@", &vars), "");
        assert_eq!(expand_vars("${?}", &vars), "status");
    }

    #[test]
    fn trailing_and_bare_dollars_stay_literal() {
        let vars = env(&[]);
        assert_eq!(expand_vars("price$", &vars), "price$");
        assert_eq!(expand_vars("$ alone", &vars), "$ alone");
        assert_eq!(expand_vars("a$ b$", &vars), "a$ b$");
    }

    #[test]
    fn malformed_braces_are_swallowed() {
        let vars = env(&[("A", "foo")]);
        assert_eq!(expand_vars("x${}y", &vars), "xy");
        assert_eq!(expand_vars("x${unclosed", &vars), "xunclosed");
        assert_eq!(expand_vars("${A}ok", &vars), "foook");
    }

    #[test]
    fn escaped_dollar_becomes_literal() {
        let vars = env(&[("A", "foo")]);
        assert_eq!(expand_vars("p4\\$\\$w0rd", &vars), "p4$$w0rd");
        assert_eq!(expand_vars("cost: \\$5", &vars), "cost: $5");
        assert_eq!(expand_vars("\\$A", &vars), "$A");
    }

    #[test]
    fn doubled_dollar_is_a_single_literal_dollar() {
        let vars = env(&[]);
        assert_eq!(expand_vars("$$", &vars), "$");
        assert_eq!(expand_vars("${$}", &vars), "$");
    }

    #[test]
    fn referenced_value_is_quote_stripped() {
        let vars = env(&[("Q", "\"quoted\""), ("S", "'single'")]);
        assert_eq!(expand_vars("$Q/$S", &vars), "quoted/single");
    }

    #[test]
    fn substituted_text_is_not_re_expanded() {
        let vars = env(&[("A", "$B"), ("B", "deep")]);
        assert_eq!(expand_vars("$A", &vars), "$B");
    }

    #[test]
    fn non_ascii_after_dollar_keeps_dollar_literal() {
        let vars = env(&[]);
        assert_eq!(expand_vars("$é", &vars), "$é");
    }

    #[test]
    fn braced_name_may_contain_non_ascii() {
        let vars = env(&[("héllo", "salut")]);
        assert_eq!(expand_vars("${héllo}!", &vars), "salut!");
    }

    #[test]
    fn no_dollar_fast_path_returns_input() {
        let vars = env(&[("A", "foo")]);
        assert_eq!(expand_vars("plain text", &vars), "plain text");
    }
}
