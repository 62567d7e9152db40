use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::env::TargetEnv;
use crate::error::Error;
use crate::model::{EnvMap, LoadReport};
use crate::parser::parse_str;

/// Parse a dotenv file into a resolved map.
///
/// No environment is read or written; this is the file-backed form of
/// [`parse_str`].
pub fn parse(path: impl AsRef<Path>) -> Result<EnvMap, Error> {
    let path = path.as_ref();
    let content = read_source(path)?;
    parse_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a dotenv file into the process environment.
///
/// `override_flags` keeps the override switch optional: `&[]` leaves
/// existing variables untouched, `&[true]` overwrites them. Passing more
/// than one flag fails with [`Error::TooManyArguments`] before the file
/// is opened.
///
/// # Safety
///
/// Writes through [`TargetEnv::process`]; the caller must uphold its
/// safety contract for the duration of the call.
pub unsafe fn load(path: impl AsRef<Path>, override_flags: &[bool]) -> Result<LoadReport, Error> {
    if override_flags.len() > 1 {
        return Err(Error::TooManyArguments);
    }
    let override_existing = override_flags.first().copied().unwrap_or(false);

    let mut loader = EnvLoader::new()
        .path(path)
        .override_existing(override_existing)
        .target(unsafe { TargetEnv::process() });
    loader.load()
}

/// Load `.env` from the current working directory into the process
/// environment. Existing variables win.
///
/// # Safety
///
/// Same contract as [`load`].
pub unsafe fn dotenv() -> Result<LoadReport, Error> {
    unsafe { from_filename(".env") }
}

/// Load a dotenv file by name from the current working directory into
/// the process environment. Existing variables win.
///
/// # Safety
///
/// Same contract as [`load`].
pub unsafe fn from_filename(name: &str) -> Result<LoadReport, Error> {
    unsafe { from_path(PathBuf::from(name)) }
}

/// Load a dotenv file from a specific path into the process
/// environment. Existing variables win.
///
/// # Safety
///
/// Same contract as [`load`].
pub unsafe fn from_path(path: impl AsRef<Path>) -> Result<LoadReport, Error> {
    unsafe { load(path, &[]) }
}

/// Builder-style dotenv loader.
///
/// The default configuration reads `.env`, keeps variables the target
/// already defines, and writes to a fresh in-memory target, so a plain
/// `EnvLoader::new().load()` never mutates process state.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    path: PathBuf,
    override_existing: bool,
    target: TargetEnv,
}

impl EnvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// File to load. Defaults to `.env` in the current directory.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Whether loaded values replace variables the target already
    /// defines. Defaults to `false`.
    pub fn override_existing(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    /// Where variables are written.
    pub fn target(mut self, target: TargetEnv) -> Self {
        self.target = target;
        self
    }

    pub fn target_env(&self) -> &TargetEnv {
        &self.target
    }

    pub fn into_target(self) -> TargetEnv {
        self.target
    }

    /// Parse the configured file without writing anything.
    pub fn parse_only(&self) -> Result<EnvMap, Error> {
        parse(&self.path)
    }

    /// Parse the configured file and write each variable to the target.
    pub fn load(&mut self) -> Result<LoadReport, Error> {
        let vars = self.parse_only()?;
        let mut report = LoadReport::default();

        for (key, value) in &vars {
            if !self.override_existing && self.target.is_set(key) {
                log::debug!("skipping existing variable {key}");
                report.skipped_existing += 1;
                continue;
            }

            self.target
                .try_set(key, value)
                .map_err(|source| Error::EnvironmentSet {
                    path: self.path.clone(),
                    key: key.clone(),
                    source,
                })?;
            report.loaded += 1;
        }

        log::debug!(
            "loaded {} variables from {}, skipped {}",
            report.loaded,
            self.path.display(),
            report.skipped_existing
        );
        Ok(report)
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".env"),
            override_existing: false,
            target: TargetEnv::memory(),
        }
    }
}

fn read_source(path: &Path) -> Result<String, Error> {
    let mut file = File::open(path).map_err(|source| Error::SourceOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| Error::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(content)
}
