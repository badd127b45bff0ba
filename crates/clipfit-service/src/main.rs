//! Size-constrained compression CLI.
//!
//! Stands in for the UI action of the surrounding application: each file
//! argument is compressed to fit the configured budget (or passed through
//! when already small enough) and the resulting path is printed on stdout.

use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipfit_models::is_video_file;
use clipfit_service::{CompressionService, Prepared, ServiceConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON opt-in
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::from_default_env().add_directive("clipfit=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("usage: clipfit <video file>...");
        std::process::exit(2);
    }

    let config = match ServiceConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let service = match CompressionService::new(config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to start compression service: {}", e);
            std::process::exit(1);
        }
    };

    let mut failed = false;

    for file in &files {
        let path = Path::new(file);

        if !is_video_file(path) {
            error!("Not a supported video file: {}", file);
            failed = true;
            continue;
        }

        match service.prepare(path).await {
            Ok(Prepared::Original(original)) => {
                info!(path = %original.display(), "Already within limit");
                println!("{}", original.display());
            }
            Ok(Prepared::Compressed(result)) => {
                // Working storage dies with the process, so hand the caller
                // a copy beside the source.
                match export_beside(path, &result.output_path).await {
                    Ok(exported) => {
                        info!(
                            path = %exported.display(),
                            bytes = result.output_bytes,
                            passes = result.passes,
                            "Compressed"
                        );
                        println!("{}", exported.display());
                    }
                    Err(e) => {
                        error!("Failed to export artifact for {}: {}", file, e);
                        failed = true;
                    }
                }
            }
            Err(e) => {
                match e.diagnostics() {
                    Some(diagnostics) => {
                        error!("Compression failed for {}: {}\n{}", file, e, diagnostics)
                    }
                    None => error!("Compression failed for {}: {}", file, e),
                }
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Copy an artifact out of working storage, into the source's directory.
async fn export_beside(
    source: &Path,
    artifact: &Path,
) -> std::io::Result<std::path::PathBuf> {
    let dir = source.parent().unwrap_or_else(|| Path::new("."));
    let name = artifact
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "unnamed artifact"))?;
    let dest = dir.join(name);
    tokio::fs::copy(artifact, &dest).await?;
    Ok(dest)
}
