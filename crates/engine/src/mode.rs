use std::fmt;
use std::str::FromStr;

/// How files and directory references are materialized in the output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LinkMode {
    /// Files become file symlinks and directory references become directory
    /// symlinks pointing at the resolved source.
    Symlink,
    /// Files are copied byte for byte. Directory references become junctions
    /// (plain directory symlinks on Unix).
    Copy,
}

impl LinkMode {
    /// Returns the lowercase name used by [`Display`](fmt::Display) and
    /// [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symlink => "symlink",
            Self::Copy => "copy",
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown link mode.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown link mode '{input}': expected 'symlink' or 'copy'")]
pub struct LinkModeParseError {
    input: String,
}

impl FromStr for LinkMode {
    type Err = LinkModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symlink" => Ok(Self::Symlink),
            "copy" => Ok(Self::Copy),
            _ => Err(LinkModeParseError {
                input: s.to_owned(),
            }),
        }
    }
}
