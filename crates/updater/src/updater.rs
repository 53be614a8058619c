use std::fs;
use std::io;
use std::mem;
use std::path::{Path, PathBuf};

use engine::{ApplyError, ApplySummary, LinkMode, TreeApplier, remove_children, remove_tree};
use logging::trace_update;
use tree::{DirectoryIndex, Node};

use crate::config::UpdaterConfig;
use crate::error::UpdaterError;
use crate::report::UpdateReport;
use crate::state::UpdaterState;

/// Keeps an output directory in sync with successive tree descriptions.
///
/// Each [`Updater::update`] diffs the new tree against the one applied last
/// and performs only the operations needed to get from one to the other. When
/// an incremental pass fails the output is wiped and rebuilt from scratch,
/// unless [`UpdaterConfig::retry_on_failure`] is disabled.
///
/// The updater assumes it is the only writer of its output path.
#[derive(Debug)]
pub struct Updater {
    output: PathBuf,
    config: UpdaterConfig,
    link_mode: LinkMode,
    state: UpdaterState,
}

impl Updater {
    /// Binds an updater to `output`.
    ///
    /// The output must be absent or an empty directory. A relative path is
    /// made absolute against the current directory. Without an explicit link
    /// mode, symlink support is probed in the output's parent directory.
    ///
    /// # Errors
    ///
    /// Returns [`UpdaterError::OutputNotEmpty`] or
    /// [`UpdaterError::OutputNotDirectory`] when something is already at
    /// `output`, and [`UpdaterError::InspectOutput`] when it cannot be
    /// examined.
    pub fn new(output: impl AsRef<Path>, config: UpdaterConfig) -> Result<Self, UpdaterError> {
        let output = output.as_ref();
        let output = std::path::absolute(output).map_err(|source| UpdaterError::InspectOutput {
            path: output.to_path_buf(),
            source,
        })?;
        check_output(&output)?;

        let link_mode = config
            .link_mode()
            .unwrap_or_else(|| LinkMode::detect(output.parent().unwrap_or(&output)));
        tracing::debug!(
            target: logging::targets::UPDATE,
            output = %output.display(),
            mode = %link_mode,
            "updater created"
        );

        Ok(Self {
            output,
            config,
            link_mode,
            state: UpdaterState::Empty,
        })
    }

    /// Returns the absolute output path.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Returns the link mode in effect, probed or configured.
    #[must_use]
    pub const fn link_mode(&self) -> LinkMode {
        self.link_mode
    }

    /// Returns the configuration the updater was created with.
    #[must_use]
    pub const fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &UpdaterState {
        &self.state
    }

    /// Makes the output reflect `tree`.
    ///
    /// `tree` must be a directory index, or `None` to remove the output.
    /// After an earlier failure the output is wiped before anything else.
    ///
    /// # Errors
    ///
    /// - [`UpdaterError::UnexpectedNodeType`] for a file or directory
    ///   reference root. Nothing is touched and the state is unchanged.
    /// - [`UpdaterError::Apply`] when the update fails and retrying is
    ///   disabled.
    /// - [`UpdaterError::Rebuild`] when the update and the full rebuild that
    ///   followed both fail.
    /// - [`UpdaterError::InspectOutput`] when the output cannot be examined.
    ///
    /// Every error except the first leaves the updater in
    /// [`UpdaterState::Errored`].
    pub fn update(&mut self, tree: Option<Node>) -> Result<UpdateReport, UpdaterError> {
        if let Some(root) = &tree
            && !matches!(root, Node::Index(_))
        {
            return Err(UpdaterError::UnexpectedNodeType { kind: root.kind() });
        }

        let previous = mem::replace(&mut self.state, UpdaterState::Errored);
        let (old, full_rebuild) = match previous {
            UpdaterState::Empty => (self.current_baseline()?, false),
            UpdaterState::Mirrored(node) => (Some(node), false),
            UpdaterState::Errored => {
                self.wipe().map_err(|source| self.apply_error(source))?;
                (self.current_baseline()?, true)
            }
        };

        let original = match self.run(old.as_ref(), tree.as_ref()) {
            Ok(summary) => return Ok(self.finish(tree, summary, None, full_rebuild)),
            Err(error) => error,
        };
        if !self.config.retry_on_failure() {
            return Err(self.apply_error(original));
        }

        tracing::warn!(
            target: logging::targets::UPDATE,
            output = %self.output.display(),
            error = %original,
            "update failed; rebuilding output from scratch"
        );
        match self.rebuild(tree.as_ref()) {
            Ok(summary) => Ok(self.finish(tree, summary, Some(original), true)),
            Err(source) => Err(UpdaterError::Rebuild {
                path: self.output.clone(),
                original,
                source,
            }),
        }
    }

    fn run(&self, old: Option<&Node>, new: Option<&Node>) -> Result<ApplySummary, ApplyError> {
        let mut applier =
            TreeApplier::new(self.link_mode).collect_records(self.config.collect_records());
        applier.apply(&self.output, old, new)?;
        Ok(applier.into_summary())
    }

    fn rebuild(&self, tree: Option<&Node>) -> Result<ApplySummary, ApplyError> {
        self.wipe()?;
        let baseline = self
            .baseline()
            .map_err(|source| ApplyError::io("inspect output", self.output.as_path(), source))?;
        self.run(baseline.as_ref(), tree)
    }

    fn finish(
        &mut self,
        tree: Option<Node>,
        summary: ApplySummary,
        recovered_from: Option<ApplyError>,
        full_rebuild: bool,
    ) -> UpdateReport {
        self.state = tree.map_or(UpdaterState::Empty, UpdaterState::Mirrored);
        trace_update!(
            output = %self.output.display(),
            state = %self.state,
            full_rebuild,
            "update complete"
        );
        UpdateReport {
            summary,
            recovered_from,
            full_rebuild,
        }
    }

    /// Describes what is at the output when no tree has been applied yet.
    ///
    /// An existing real directory is an empty index; after a wipe it has no
    /// entries. Anything else is treated as absent.
    fn baseline(&self) -> io::Result<Option<Node>> {
        match fs::symlink_metadata(&self.output) {
            Ok(metadata) if metadata.is_dir() => Ok(Some(Node::from(DirectoryIndex::new()))),
            Ok(_) => Ok(None),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Removes everything inside a real output directory, or the output entry
    /// itself when it is anything else. Links are never followed.
    fn wipe(&self) -> Result<(), ApplyError> {
        match fs::symlink_metadata(&self.output) {
            Ok(metadata) if metadata.is_dir() => remove_children(&self.output)?,
            Ok(_) => remove_tree(&self.output)?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(ApplyError::io("inspect output", self.output.as_path(), error)),
        }
        trace_update!(output = %self.output.display(), "wiped output");
        Ok(())
    }

    fn current_baseline(&self) -> Result<Option<Node>, UpdaterError> {
        self.baseline().map_err(|source| UpdaterError::InspectOutput {
            path: self.output.clone(),
            source,
        })
    }

    fn apply_error(&self, source: ApplyError) -> UpdaterError {
        UpdaterError::Apply {
            path: self.output.clone(),
            source,
        }
    }
}

/// Accepts an absent output or an empty real directory.
fn check_output(output: &Path) -> Result<(), UpdaterError> {
    let inspect = |source: io::Error| UpdaterError::InspectOutput {
        path: output.to_path_buf(),
        source,
    };
    match fs::symlink_metadata(output) {
        Ok(metadata) if metadata.is_dir() => {
            let mut entries = fs::read_dir(output).map_err(inspect)?;
            match entries.next() {
                None => Ok(()),
                Some(Ok(_)) => Err(UpdaterError::OutputNotEmpty {
                    path: output.to_path_buf(),
                }),
                Some(Err(error)) => Err(inspect(error)),
            }
        }
        Ok(_) => Err(UpdaterError::OutputNotDirectory {
            path: output.to_path_buf(),
        }),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(inspect(error)),
    }
}
