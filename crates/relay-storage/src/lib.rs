//! Relay Storage Library
//!
//! This crate provides the publisher abstraction and its backends: Google Cloud
//! Storage through `object_store`, and a local filesystem backend used for
//! development and replay.
//!
//! # Key format
//!
//! Keys are produced by `relay_core::keys` and passed through unchanged. The
//! local backend additionally rejects keys containing `..` or a leading `/`.

pub mod factory;
#[cfg(feature = "storage-gcs")]
pub mod gcs;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_publisher;
#[cfg(feature = "storage-gcs")]
pub use gcs::GcsPublisher;
#[cfg(feature = "storage-local")]
pub use local::LocalPublisher;
pub use relay_core::StorageBackend;
pub use traits::{PublishedObject, Publisher, StorageError, StorageResult};
