//! Run configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default name for the generated artifact tarball.
pub const DEFAULT_OUTFILE: &str = "out.tar.gz";

/// Configuration for one cache run, built from parsed CLI flags and passed
/// explicitly into each component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Files that determine the cache key. Order is significant: reordering
    /// the list changes the fingerprint.
    pub hash_files: Vec<PathBuf>,
    /// Directories whose contents become the cached artifact.
    pub package_dirs: Vec<PathBuf>,
    /// Shell command run on a cache miss to produce the package directories.
    pub build_command: String,
    /// Object store bucket holding cached artifacts.
    pub bucket: String,
    /// Name of the artifact tarball, both locally and in the storage key.
    #[serde(default = "default_outfile")]
    pub outfile: String,
}

fn default_outfile() -> String {
    DEFAULT_OUTFILE.to_string()
}
