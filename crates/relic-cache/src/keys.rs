//! Storage key derivation.

/// Derive the object-store key for an artifact: `<fingerprint>/<filename>`.
///
/// Identical ordered inputs yield identical keys, which is what deduplicates
/// artifacts across runs.
pub fn storage_key(fingerprint: &str, filename: &str) -> String {
    format!("{}/{}", fingerprint, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_fingerprint_and_filename() {
        assert_eq!(storage_key("abc123", "out.tar.gz"), "abc123/out.tar.gz");
    }
}
