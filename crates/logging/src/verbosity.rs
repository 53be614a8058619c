//! crates/logging/src/verbosity.rs
//! Coarse verbosity levels and their filter directives.

use std::fmt;
use std::str::FromStr;

use crate::targets;

/// User-facing verbosity, ordered from silent to most detailed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Verbosity {
    /// Only errors.
    Quiet,
    /// Warnings, including recovered update failures.
    #[default]
    Normal,
    /// Updater lifecycle events.
    Verbose,
    /// Every created and removed entry, and every directory scan.
    Debug,
    /// Fast-path skips and symlink resolution steps.
    Trace,
}

impl Verbosity {
    /// Maps a repeat count (as produced by `-v` flags) to a verbosity level.
    ///
    /// Counts past the highest level saturate at [`Verbosity::Trace`].
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Returns the level name understood by `EnvFilter` directives.
    #[must_use]
    pub const fn level_name(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Renders comma separated filter directives covering every fs-mirror target.
    ///
    /// ```
    /// use logging::Verbosity;
    ///
    /// assert_eq!(
    ///     Verbosity::Quiet.directives(),
    ///     "fs_mirror::apply=error,fs_mirror::delete=error,fs_mirror::scan=error,\
    ///      fs_mirror::resolve=error,fs_mirror::update=error"
    /// );
    /// ```
    #[must_use]
    pub fn directives(self) -> String {
        let level = self.level_name();
        targets::ALL
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown verbosity name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerbosityParseError {
    input: String,
}

impl fmt::Display for VerbosityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown verbosity '{}': expected quiet, normal, verbose, debug or trace",
            self.input
        )
    }
}

impl std::error::Error for VerbosityParseError {}

impl FromStr for Verbosity {
    type Err = VerbosityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(VerbosityParseError {
                input: s.to_owned(),
            }),
        }
    }
}
