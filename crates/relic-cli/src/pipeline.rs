//! The sequential cache pipeline.
//!
//! One linear decision per run: fingerprint the inputs, look the key up in
//! the store, then either unpack the cached artifact (hit) or build, archive,
//! and upload (miss). Every error propagates up to `main`, which is the sole
//! exit point; the one exception is the lookup itself, where any error is
//! folded into the miss path.

use relic_cache::store::ArtifactStore;
use relic_cache::{archive, fingerprint, keys};
use relic_core::config::CacheConfig;
use relic_core::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::executor;

/// How a run resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The artifact was fetched from the store and unpacked.
    Hit,
    /// The build ran and its output was archived and uploaded.
    Miss,
}

pub async fn run(
    config: &CacheConfig,
    store: &dyn ArtifactStore,
    workspace: &Path,
) -> Result<Outcome> {
    let digest = fingerprint::fingerprint_files(&config.hash_files)?;
    info!(fingerprint = %digest, "computed input fingerprint");

    let key = keys::storage_key(&digest, &config.outfile);
    match store.fetch(&key).await {
        Ok(bytes) => {
            info!(key = %key, size = bytes.len(), "cache hit, unpacking artifact");
            archive::extract_archive(&bytes, workspace)?;
            Ok(Outcome::Hit)
        }
        Err(err) => {
            debug!(key = %key, error = %err, "lookup failed, treating as a miss");
            info!(key = %key, "cache miss, building");

            executor::run_build(&config.build_command, workspace).await?;

            let outfile = workspace.join(&config.outfile);
            archive::create_archive(&config.package_dirs, workspace, &outfile)?;
            info!(path = %outfile.display(), "artifact written");

            store.put(&key, &outfile).await?;
            Ok(Outcome::Miss)
        }
    }
}
