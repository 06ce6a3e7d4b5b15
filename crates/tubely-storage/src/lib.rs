//! Tubely Storage Library
//!
//! Storage key generation plus the backends uploaded assets are written to:
//! an S3 bucket (through `object_store`) for videos and a local directory for
//! thumbnails.
//!
//! # Storage key format
//!
//! A key is 32 random bytes, URL-safe base64 without padding, followed by
//! `.{extension}`. Backends receive a *path* built from the key by the
//! placement step (e.g. `landscape/{key}` for videos). Paths must not contain
//! `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_thumbnail_storage, create_video_storage};
pub use keys::{generate_key, KeyError, StorageKey};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
