use crate::error::Error;

/// A snapshot of one flag's resolved state, produced fresh on every
/// successful remote resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagState {
    name: String,
    enabled: bool,
}

impl FlagState {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        FlagState {
            name: name.into(),
            enabled,
        }
    }

    /// The flag name this state was resolved for.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// StateRepository is the interface a flag-evaluation framework reads
/// feature state through.
///
/// Repositories are safe to share across threads; callers on different flags
/// are never serialized against each other.
pub trait StateRepository: Send + Sync {
    /// Retrieve the state of the flag named `name`.
    ///
    /// `Ok(None)` means the flag is not declared in the backing store, which
    /// is distinct from a declared-but-disabled flag; callers typically fall
    /// through to the next repository in their chain or to a default state.
    fn feature_state(&self, name: &str) -> Result<Option<FlagState>, Error>;

    /// Persist a new state for a flag.
    ///
    /// Every repository in this crate is read-only and returns
    /// [Error::WriteNotSupported] unconditionally.
    fn set_feature_state(&self, state: FlagState) -> Result<(), Error>;
}
