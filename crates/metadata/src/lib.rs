#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `metadata` groups the small amount of file metadata handling fs-mirror
//! needs: a compact [`FileStat`] snapshot used to decide whether a copied
//! file is still current, and helpers that stamp permissions and timestamps
//! from a source file onto its copy.
//!
//! # Invariants
//!
//! - [`FileStat`] equality considers inode, size and mode only.
//! - Stamping helpers follow symlinks; callers only apply them to regular
//!   files they created themselves.
//!
//! # Errors
//!
//! Stamping failures surface as [`MetadataError`], carrying the action that
//! failed, the destination path and the underlying [`std::io::Error`].

mod apply;
mod error;
mod stat;

pub use apply::{apply_file_metadata, apply_file_times, apply_permissions};
pub use error::MetadataError;
pub use stat::FileStat;
