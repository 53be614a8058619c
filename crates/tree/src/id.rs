use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity token assigned to every node at construction.
///
/// Tokens are never reused within a process. Clones of a [`crate::Node`]
/// share their token, while separately constructed nodes never do, even when
/// they describe the same path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw token value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_increasing() {
        let first = NodeId::next();
        let second = NodeId::next();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn display_prefixes_hash() {
        assert_eq!(NodeId(7).to_string(), "#7");
        assert_eq!(NodeId(7).get(), 7);
    }
}
