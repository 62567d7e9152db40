use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a file-level parse or load operation.
///
/// Raw text from the source file is embedded with `{:?}` so control
/// characters stay escaped and the message remains a single line.
#[derive(Debug, Error)]
pub enum Error {
    /// The source file could not be opened.
    #[error("error opening {path}: {source}")]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source file was opened but could not be read, including
    /// content that is not valid UTF-8.
    #[error("error reading {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line or value in the source failed to parse.
    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// More than one override flag was passed to [`load`](crate::load).
    #[error("too many arguments in call to load")]
    TooManyArguments,

    /// The target environment rejected a variable write.
    #[error("{path}: failed to set environment variable {key}: {source}")]
    EnvironmentSet {
        path: PathBuf,
        key: String,
        #[source]
        source: SetVarError,
    },
}

/// Failure of a single line or value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A non-blank, non-comment line has no `=` separator.
    #[error("line {line}: {text:?} key defined without \"=\" separator or value")]
    MalformedLine { line: u32, text: String },

    /// The key portion of a line is empty after trimming.
    #[error("line {line}: {text:?} value defined without key")]
    EmptyKey { line: u32, text: String },

    /// A double-quoted value failed escape decoding. `value` is the raw
    /// text as stored during scanning, quotes included.
    #[error("error processing escape sequences in {key}={value:?} key-value pair: {source}")]
    Escape {
        key: String,
        value: String,
        #[source]
        source: EscapeError,
    },
}

/// Failure inside a double-quoted value's escape sequences.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EscapeError {
    /// The value ends with a lone backslash.
    #[error("string ends with an incomplete escape sequence \"\\\" (trailing backslash)")]
    TrailingBackslash,

    /// `\` is followed by a character with no defined meaning.
    /// `position` is the 0-based code point index of that character
    /// within the unquoted value.
    #[error("invalid escape sequence \"\\{ch}\" at position {position}")]
    InvalidSequence { ch: char, position: usize },
}

/// Rejection of a single environment variable write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetVarError {
    /// Variable names must be non-empty and free of `=` and NUL.
    #[error("invalid variable name {name:?}")]
    InvalidName { name: String },

    /// Variable values must not contain NUL.
    #[error("invalid variable value {value:?}")]
    InvalidValue { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_error_displays_offending_character_and_position() {
        let err = EscapeError::InvalidSequence { ch: 'x', position: 7 };
        assert_eq!(err.to_string(), "invalid escape sequence \"\\x\" at position 7");
    }

    #[test]
    fn trailing_backslash_message() {
        assert_eq!(
            EscapeError::TrailingBackslash.to_string(),
            "string ends with an incomplete escape sequence \"\\\" (trailing backslash)"
        );
    }

    #[test]
    fn raw_text_is_debug_escaped() {
        let err = ParseError::MalformedLine {
            line: 3,
            text: "tab\there".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "line 3: \"tab\\there\" key defined without \"=\" separator or value"
        );
    }

    #[test]
    fn escape_wrap_names_key_and_raw_value() {
        let err = ParseError::Escape {
            key: "KEY".to_owned(),
            value: "\"a\\x\"".to_owned(),
            source: EscapeError::InvalidSequence { ch: 'x', position: 1 },
        };
        let text = err.to_string();
        assert!(text.starts_with("error processing escape sequences in KEY="));
        assert!(text.contains("invalid escape sequence \"\\x\" at position 1"));
    }
}
