//! Download engine: streams one asset to `directory/filename`.

mod progress;

pub use progress::DownloadProgress;

use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::PeekError;
use crate::http::HttpClient;
use crate::runtime::Runtime;

/// Outcome of a completed download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub total_bytes: u64,
    pub elapsed: Duration,
}

/// Resolve the file path for an asset, rejecting names that would escape
/// the destination directory.
pub fn destination_path(directory: &Path, filename: &str) -> Result<PathBuf, PeekError> {
    let name = Path::new(filename);
    match name.file_name() {
        Some(base) if base == name.as_os_str() => Ok(directory.join(base)),
        _ => Err(PeekError::Io(format!("Invalid asset file name: {:?}", filename))),
    }
}

/// Download `url` into `directory/filename`.
///
/// Missing directories are created first. An existing file is truncated, so
/// every call starts from byte zero. When `cancel` fires the partial file is
/// closed and left in place, and `DownloadInterrupted` is returned.
#[tracing::instrument(skip(runtime, http_client, cancel, on_progress))]
pub async fn download_asset<R, P>(
    runtime: &R,
    http_client: &HttpClient,
    url: &str,
    directory: &Path,
    filename: &str,
    cancel: &CancellationToken,
    on_progress: P,
) -> Result<DownloadReport, PeekError>
where
    R: Runtime,
    P: FnMut(&DownloadProgress),
{
    let path = destination_path(directory, filename)?;

    runtime
        .create_dir_all(directory)
        .map_err(|e| PeekError::Io(format!("{:#}", e)))?;

    info!("Downloading {} to {:?}...", url, path);

    let progress = http_client
        .stream_to(
            url,
            || {
                runtime
                    .create_file(&path)
                    .map_err(|e| PeekError::Io(format!("{:#}", e)))
            },
            cancel,
            on_progress,
        )
        .await?;

    let report = DownloadReport {
        path,
        bytes_written: progress.bytes_written,
        total_bytes: progress.total_bytes,
        elapsed: progress.elapsed(),
    };

    info!(
        "Download complete: {} bytes in {:?}",
        report.bytes_written, report.elapsed
    );

    Ok(report)
}
