//! `.env` parsing and loading with shell-style variable expansion.
//!
//! A dotenv file holds one `KEY=VALUE` assignment per line. Blank lines
//! and `#` comments are skipped, inline comments are stripped, and
//! values may be quoted: double quotes decode backslash escapes and
//! expand `$VAR` references, single quotes are literal, unquoted values
//! expand without decoding. References resolve against the file's own
//! entries only; undefined names expand to the empty string.
//!
//! [`parse`] and [`parse_str`] return the resolved map without touching
//! any environment. [`EnvLoader`] applies a map to a [`TargetEnv`] and
//! defaults to a process-isolated in-memory target, so the builder path
//! is entirely safe:
//!
//! ```no_run
//! let mut loader = envseed::EnvLoader::new().path("app.env");
//! let report = loader.load()?;
//! println!("{} variables loaded", report.loaded);
//! # Ok::<(), envseed::Error>(())
//! ```
//!
//! The convenience loaders ([`dotenv`], [`from_filename`], [`from_path`],
//! [`load`]) write to the real process environment instead and are
//! `unsafe`: the caller promises that no other thread touches the
//! environment while they run.
//!
//! Values are resolved in the map's own unordered iteration sequence,
//! single pass. A reference to a key whose value itself contains
//! references may therefore pick up that value before or after its own
//! expansion; multi-level chains are not guaranteed to fully resolve.

mod env;
mod error;
mod expand;
mod loader;
mod model;
mod parser;
mod resolver;

pub use env::TargetEnv;
pub use error::{Error, EscapeError, ParseError, SetVarError};
pub use loader::{EnvLoader, dotenv, from_filename, from_path, load, parse};
pub use model::{EnvMap, LoadReport, QuoteStyle};
pub use parser::parse_str;
