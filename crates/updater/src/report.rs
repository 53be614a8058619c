use engine::{ApplyError, ApplySummary};

/// Outcome of a successful [`crate::Updater::update`].
#[derive(Debug)]
pub struct UpdateReport {
    pub(crate) summary: ApplySummary,
    pub(crate) recovered_from: Option<ApplyError>,
    pub(crate) full_rebuild: bool,
}

impl UpdateReport {
    /// Returns the summary of the pass that produced the output.
    ///
    /// After a recovery this describes the rebuild, not the failed pass.
    #[must_use]
    pub const fn summary(&self) -> &ApplySummary {
        &self.summary
    }

    /// Returns the failure that was recovered from by rebuilding, if any.
    #[must_use]
    pub const fn recovered_from(&self) -> Option<&ApplyError> {
        self.recovered_from.as_ref()
    }

    /// Returns `true` when the output was wiped and rebuilt from scratch.
    #[must_use]
    pub const fn full_rebuild(&self) -> bool {
        self.full_rebuild
    }

    /// Consumes the report and returns its summary.
    #[must_use]
    pub fn into_summary(self) -> ApplySummary {
        self.summary
    }
}
