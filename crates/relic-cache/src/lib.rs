//! Content-addressed artifact cache for relic (S3-compatible).

pub mod archive;
pub mod fingerprint;
pub mod keys;
pub mod store;

pub use archive::{create_archive, extract_archive};
pub use fingerprint::fingerprint_files;
pub use keys::storage_key;
pub use store::{ArtifactStore, FilesystemStore, S3Store};
