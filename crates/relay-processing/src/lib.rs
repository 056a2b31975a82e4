//! Relay Processing Library
//!
//! Stages that touch the submitted file itself:
//! - [`Fetcher`]: streams the remote file to a staging path
//! - [`ArchiveValidator`]: decides whether a staged zip archive carries any content

pub mod fetcher;
pub mod validator;

pub use fetcher::{FetchError, Fetcher};
pub use validator::{ArchiveError, ArchiveSummary, ArchiveValidator};
