#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the diagnostic plumbing shared by the fs-mirror crates.
//! Every crate emits events through [`tracing`] using the targets defined in
//! [`targets`], so a single [`EnvFilter`](tracing_subscriber::EnvFilter)
//! directive can enable or silence one subsystem (scanning, applying,
//! deleting, updater recovery) independently of the others.
//!
//! # Design
//!
//! - [`targets`] holds the target names used by the rest of the workspace.
//! - The `trace_*!` macros wrap the standard [`tracing`] macros with those
//!   targets and a fixed level, keeping call sites short.
//! - [`Verbosity`] maps a coarse user-facing level to filter directives.
//! - [`init_tracing`] installs a formatting subscriber; it honours `RUST_LOG`
//!   when present and never panics when a subscriber is already installed.
//!
//! # Examples
//!
//! ```
//! use logging::{Verbosity, targets};
//!
//! let directives = Verbosity::Debug.directives();
//! assert!(directives.contains(targets::APPLY));
//! ```

pub mod targets;
mod tracing_bridge;
mod tracing_macros;
mod verbosity;

pub use tracing_bridge::{init_tracing, init_tracing_with_directives};
pub use verbosity::{Verbosity, VerbosityParseError};
