use crate::pipeline::{self, Outcome};
use relic_cache::store::{ArtifactStore, FilesystemStore};
use relic_cache::{archive, fingerprint, keys};
use relic_core::Error;
use relic_core::config::CacheConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    workspace: TempDir,
    store_root: TempDir,
    config: CacheConfig,
}

fn fixture(build_command: &str) -> Fixture {
    let workspace = tempfile::tempdir().unwrap();
    let store_root = tempfile::tempdir().unwrap();

    std::fs::write(workspace.path().join("a.txt"), "x").unwrap();
    std::fs::write(workspace.path().join("b.txt"), "y").unwrap();

    let config = CacheConfig {
        hash_files: vec![
            workspace.path().join("a.txt"),
            workspace.path().join("b.txt"),
        ],
        package_dirs: vec![PathBuf::from("outdir")],
        build_command: build_command.to_string(),
        bucket: "test-bucket".to_string(),
        outfile: "out.tar.gz".to_string(),
    };

    Fixture {
        workspace,
        store_root,
        config,
    }
}

impl Fixture {
    fn store(&self) -> FilesystemStore {
        FilesystemStore::new(self.store_root.path().to_path_buf())
    }

    fn key(&self) -> String {
        let digest = fingerprint::fingerprint_files(&self.config.hash_files).unwrap();
        keys::storage_key(&digest, &self.config.outfile)
    }

    fn build_count(&self) -> usize {
        std::fs::read_to_string(self.workspace.path().join("build.log"))
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }
}

// Records each invocation in build.log so tests can count how often the
// build actually ran.
const BUILD: &str = "echo ran >> build.log && mkdir -p outdir && echo built > outdir/result.txt";

#[tokio::test]
async fn miss_builds_archives_and_uploads_once() {
    let fx = fixture(BUILD);
    let store = fx.store();

    let outcome = pipeline::run(&fx.config, &store, fx.workspace.path())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Miss);
    assert_eq!(fx.build_count(), 1);
    assert!(fx.workspace.path().join("out.tar.gz").exists());
    assert!(store.fetch(&fx.key()).await.is_ok());
}

#[tokio::test]
async fn hit_unpacks_without_building() {
    // Stage an artifact under the expected key, then run with a build command
    // that would fail if it were ever invoked.
    let fx = fixture("exit 1");
    let store = fx.store();

    let staging = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(staging.path().join("outdir")).unwrap();
    std::fs::write(staging.path().join("outdir/result.txt"), "cached").unwrap();
    let artifact = staging.path().join("artifact.tar.gz");
    archive::create_archive(&[PathBuf::from("outdir")], staging.path(), &artifact).unwrap();
    store.put(&fx.key(), &artifact).await.unwrap();

    let outcome = pipeline::run(&fx.config, &store, fx.workspace.path())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Hit);
    assert_eq!(fx.build_count(), 0);
    assert_eq!(
        std::fs::read_to_string(fx.workspace.path().join("outdir/result.txt")).unwrap(),
        "cached"
    );
    // No archive is produced on a hit.
    assert!(!fx.workspace.path().join("out.tar.gz").exists());
}

#[tokio::test]
async fn second_run_hits_what_the_first_uploaded() {
    let fx = fixture(BUILD);
    let store = fx.store();

    let first = pipeline::run(&fx.config, &store, fx.workspace.path())
        .await
        .unwrap();
    assert_eq!(first, Outcome::Miss);

    let second = pipeline::run(&fx.config, &store, fx.workspace.path())
        .await
        .unwrap();
    assert_eq!(second, Outcome::Hit);
    assert_eq!(fx.build_count(), 1);
}

#[tokio::test]
async fn failing_build_aborts_before_archive_and_upload() {
    let fx = fixture("echo ran >> build.log && exit 3");
    let store = fx.store();

    let err = pipeline::run(&fx.config, &store, fx.workspace.path())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BuildFailed { exit_code: 3 }));
    assert_eq!(fx.build_count(), 1);
    assert!(!fx.workspace.path().join("out.tar.gz").exists());
    assert!(store.fetch(&fx.key()).await.is_err());
}

#[tokio::test]
async fn changed_input_misses_a_previously_cached_key() {
    let fx = fixture(BUILD);
    let store = fx.store();

    pipeline::run(&fx.config, &store, fx.workspace.path())
        .await
        .unwrap();

    std::fs::write(fx.workspace.path().join("b.txt"), "changed").unwrap();
    let outcome = pipeline::run(&fx.config, &store, fx.workspace.path())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Miss);
    assert_eq!(fx.build_count(), 2);
}

#[tokio::test]
async fn unreadable_hash_input_fails_before_lookup() {
    let fx = fixture(BUILD);
    let store = fx.store();

    let mut config = fx.config.clone();
    config.hash_files.push(Path::new("/nonexistent/input").to_path_buf());

    let err = pipeline::run(&config, &store, fx.workspace.path())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fingerprint { .. }));
    assert_eq!(fx.build_count(), 0);
}
