//! Updater configuration and its builder.

use engine::LinkMode;

/// Settings for an [`crate::Updater`].
///
/// # Example
///
/// ```rust
/// use engine::LinkMode;
/// use updater::UpdaterConfig;
///
/// let config = UpdaterConfig::builder()
///     .link_mode(LinkMode::Copy)
///     .retry_on_failure(false)
///     .build();
/// assert_eq!(config.link_mode(), Some(LinkMode::Copy));
/// assert!(!config.retry_on_failure());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct UpdaterConfig {
    link_mode: Option<LinkMode>,
    retry_on_failure: bool,
    collect_records: bool,
}

impl UpdaterConfig {
    /// Returns a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> UpdaterConfigBuilder {
        UpdaterConfigBuilder::default()
    }

    /// Returns the requested link mode, or `None` to probe for symlink
    /// support.
    #[must_use]
    pub const fn link_mode(&self) -> Option<LinkMode> {
        self.link_mode
    }

    /// Returns whether a failed update is retried as a full rebuild.
    #[must_use]
    pub const fn retry_on_failure(&self) -> bool {
        self.retry_on_failure
    }

    /// Returns whether update reports carry per-action records.
    #[must_use]
    pub const fn collect_records(&self) -> bool {
        self.collect_records
    }
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            link_mode: None,
            retry_on_failure: true,
            collect_records: false,
        }
    }
}

/// Builder for [`UpdaterConfig`].
#[derive(Clone, Debug, Default)]
pub struct UpdaterConfigBuilder {
    config: UpdaterConfig,
}

impl UpdaterConfigBuilder {
    /// Forces a link mode instead of probing.
    #[must_use]
    pub const fn link_mode(mut self, mode: LinkMode) -> Self {
        self.config.link_mode = Some(mode);
        self
    }

    /// Probes symlink support at construction time. This is the default.
    #[must_use]
    pub const fn detect_link_mode(mut self) -> Self {
        self.config.link_mode = None;
        self
    }

    /// Enables or disables the automatic full rebuild after a failure.
    #[must_use]
    pub const fn retry_on_failure(mut self, retry: bool) -> Self {
        self.config.retry_on_failure = retry;
        self
    }

    /// Enables or disables per-action records in update reports.
    #[must_use]
    pub const fn collect_records(mut self, collect: bool) -> Self {
        self.config.collect_records = collect;
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub const fn build(self) -> UpdaterConfig {
        self.config
    }
}
