//! Artifact packaging: gzip-compressed tar archives of the package directories.

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use relic_core::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pack the given directories into a gzip-compressed tar archive at `out`.
///
/// Directories are resolved against `base_dir` and walked depth-first in the
/// filesystem's own listing order. Regular files are stored with their mode,
/// size, and content; symlinks are stored with their link target and no
/// content. Directories themselves produce no entries, so an empty directory
/// is absent from the archive. The tar stream is compressed as it is written,
/// with no temporary uncompressed archive on disk.
///
/// The in-archive entry names are built from the directory paths as given, so
/// relative `dirs` unpack back to the same relative locations.
pub fn create_archive(dirs: &[PathBuf], base_dir: &Path, out: &Path) -> Result<()> {
    let file = File::create(out)
        .map_err(|e| Error::Archive(format!("Failed to create {}: {}", out.display(), e)))?;
    let encoder = GzEncoder::new(file, Compression::default());

    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    for dir in dirs {
        let abs = if dir.is_absolute() {
            dir.clone()
        } else {
            base_dir.join(dir)
        };
        append_dir(&mut builder, &abs, dir)
            .map_err(|e| Error::Archive(format!("Failed to pack {}: {}", dir.display(), e)))?;
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| Error::Archive(format!("Failed to finish tar: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| Error::Archive(format!("Gzip finish failed: {}", e)))?;
    Ok(())
}

fn append_dir<W: Write>(
    builder: &mut tar::Builder<W>,
    abs: &Path,
    name: &Path,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(abs)? {
        let entry = entry?;
        let entry_abs = entry.path();
        let entry_name = name.join(entry.file_name());
        // file_type() does not follow symlinks, so a symlink to a directory
        // is appended as a symlink entry rather than recursed into.
        if entry.file_type()?.is_dir() {
            append_dir(builder, &entry_abs, &entry_name)?;
        } else {
            builder.append_path_with_name(&entry_abs, &entry_name)?;
        }
    }
    Ok(())
}

/// Unpack a gzip-compressed tar archive, already fetched into memory, under
/// `dest`.
///
/// Every entry goes through the same generic path: create missing parent
/// directories, then create/truncate a file at the entry path and copy the
/// entry content into it. Directory and symlink entries are not recreated as
/// such on extraction; a symlink entry comes back as an empty regular file.
/// This is a known gap, not a guaranteed symlink round-trip.
pub fn extract_archive(bytes: &[u8], dest: &Path) -> Result<()> {
    let decoder = GzDecoder::new(bytes);
    let mut archive = tar::Archive::new(decoder);

    let entries = archive
        .entries()
        .map_err(|e| Error::Extract(format!("Failed to read archive: {}", e)))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| Error::Extract(format!("Bad archive entry: {}", e)))?;
        let path = entry
            .path()
            .map_err(|e| Error::Extract(format!("Bad entry path: {}", e)))?
            .into_owned();
        let target = dest.join(&path);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Extract(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let mut file = File::create(&target)
            .map_err(|e| Error::Extract(format!("Failed to create {}: {}", target.display(), e)))?;
        std::io::copy(&mut entry, &mut file)
            .map_err(|e| Error::Extract(format!("Failed to write {}: {}", target.display(), e)))?;
    }

    Ok(())
}
