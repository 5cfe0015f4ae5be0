//! Input fingerprinting.

use relic_core::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::PathBuf;

/// Compute a fingerprint over an ordered list of input files.
///
/// Each file's bytes are streamed through a single SHA-256 accumulator in
/// list order, so both content and order feed the digest. Contents are hashed
/// byte-exact, with no normalization. Any file that cannot be opened or read
/// fails the whole run.
pub fn fingerprint_files(paths: &[PathBuf]) -> Result<String> {
    let mut hasher = Sha256::new();

    for path in paths {
        let mut file = File::open(path).map_err(|e| Error::Fingerprint {
            path: path.clone(),
            source: e,
        })?;
        std::io::copy(&mut file, &mut hasher).map_err(|e| Error::Fingerprint {
            path: path.clone(),
            source: e,
        })?;
    }

    Ok(hex::encode(hasher.finalize()))
}
