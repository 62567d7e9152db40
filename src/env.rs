use std::collections::BTreeMap;

use crate::error::SetVarError;

/// Destination for loaded environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnv {
    kind: TargetEnvKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetEnvKind {
    /// Write variables into the current process environment.
    ///
    /// Backed by [`std::env::set_var`], which mutates global process state
    /// with no protection against concurrent environment access.
    Process,
    /// Write variables into an in-memory map.
    Memory(BTreeMap<String, String>),
}

impl Default for TargetEnv {
    fn default() -> Self {
        Self::memory()
    }
}

impl TargetEnv {
    /// Create a target backed by the real process environment.
    ///
    /// # Safety
    ///
    /// While any load writes to this target, no other thread may read or
    /// write the process environment.
    pub unsafe fn process() -> Self {
        Self {
            kind: TargetEnvKind::Process,
        }
    }

    /// Create an empty in-memory target. Loads into it never touch
    /// process state.
    pub fn memory() -> Self {
        Self::from_memory(BTreeMap::new())
    }

    /// Create an in-memory target seeded with existing variables.
    pub fn from_memory(map: BTreeMap<String, String>) -> Self {
        Self {
            kind: TargetEnvKind::Memory(map),
        }
    }

    /// The stored variables, if this is an in-memory target.
    pub fn as_memory(&self) -> Option<&BTreeMap<String, String>> {
        match &self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    pub(crate) fn is_set(&self, key: &str) -> bool {
        match &self.kind {
            TargetEnvKind::Process => std::env::var_os(key).is_some(),
            TargetEnvKind::Memory(map) => map.contains_key(key),
        }
    }

    /// Writes one variable, first validating what the underlying store
    /// rejects: an empty name, `=` or NUL in a name, NUL in a value.
    /// Both variants validate identically.
    pub(crate) fn try_set(&mut self, key: &str, value: &str) -> Result<(), SetVarError> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(SetVarError::InvalidName {
                name: key.to_owned(),
            });
        }
        if value.contains('\0') {
            return Err(SetVarError::InvalidValue {
                value: value.to_owned(),
            });
        }

        match &mut self.kind {
            TargetEnvKind::Process => unsafe { std::env::set_var(key, value) },
            TargetEnvKind::Memory(map) => {
                map.insert(key.to_owned(), value.to_owned());
            }
        }
        Ok(())
    }
}
