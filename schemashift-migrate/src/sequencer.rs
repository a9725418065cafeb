//! Changeset version ids.

/// Allocates `major[-minor]` changeset ids.
///
/// A major number groups every changeset produced by one table-level pass;
/// the minor number orders changesets within that pass. The order of the
/// ids equals emission order, nothing more: ids are not stable across runs
/// with different filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionSequencer {
    major: u32,
    minor: u32,
}

impl VersionSequencer {
    /// Create a sequencer at `(0, 0)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new major group.
    pub fn bump_major(&mut self) {
        self.major += 1;
        self.minor = 0;
    }

    /// Undo a [`bump_major`](Self::bump_major) whose group stayed empty.
    pub fn revert_major(&mut self) {
        self.major = self.major.saturating_sub(1);
        self.minor = 0;
    }

    /// Allocate the next minor id in the current group.
    pub fn bump_minor(&mut self) -> String {
        self.minor += 1;
        self.version()
    }

    /// The current id, without allocating.
    pub fn version(&self) -> String {
        if self.minor == 0 {
            self.major.to_string()
        } else {
            format!("{}-{}", self.major, self.minor)
        }
    }

    /// The current major number.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// The current minor number.
    pub fn minor(&self) -> u32 {
        self.minor
    }
}
