use std::fmt;

use tree::Node;

/// Lifecycle state of an [`crate::Updater`].
#[derive(Clone, Debug, Default)]
pub enum UpdaterState {
    /// No tree has been applied since construction, or the last update
    /// applied `None`.
    #[default]
    Empty,
    /// The tree currently reflected at the output path.
    Mirrored(Node),
    /// The last update failed; the output contents are unknown and the next
    /// update starts by wiping them.
    Errored,
}

impl UpdaterState {
    /// Returns the mirrored tree, if any.
    #[must_use]
    pub const fn tree(&self) -> Option<&Node> {
        match self {
            Self::Mirrored(node) => Some(node),
            Self::Empty | Self::Errored => None,
        }
    }

    /// Returns `true` in the [`UpdaterState::Errored`] state.
    #[must_use]
    pub const fn is_errored(&self) -> bool {
        matches!(self, Self::Errored)
    }
}

impl fmt::Display for UpdaterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Mirrored(_) => "mirrored",
            Self::Errored => "errored",
        })
    }
}
