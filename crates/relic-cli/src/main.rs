//! relic CLI entrypoint.

use clap::Parser;
use relic_cache::store::S3Store;
use relic_core::config::{CacheConfig, DEFAULT_OUTFILE};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod executor;
mod pipeline;

#[cfg(test)]
mod pipeline_tests;

#[derive(Parser)]
#[command(name = "relic")]
#[command(author, version, about = "Content-addressed build cache", long_about = None)]
struct Cli {
    /// Files that determine the cache key, in order (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    hash_files: Vec<PathBuf>,

    /// Directories whose contents become the cached artifact (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    package_dirs: Vec<PathBuf>,

    /// Shell command that produces the package directories
    #[arg(long)]
    build_command: String,

    /// Object store bucket holding cached artifacts
    #[arg(long)]
    bucket: String,

    /// Name of the artifact tarball
    #[arg(long, default_value = DEFAULT_OUTFILE)]
    outfile: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = CacheConfig {
        hash_files: cli.hash_files,
        package_dirs: cli.package_dirs,
        build_command: cli.build_command,
        bucket: cli.bucket,
        outfile: cli.outfile,
    };

    let store = S3Store::from_env(&config.bucket).await;
    if let Err(e) = pipeline::run(&config, &store, Path::new(".")).await {
        tracing::error!(error = %e, "cache run failed");
        std::process::exit(1);
    }
}
