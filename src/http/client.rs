//! HTTP client for streaming downloads.

use log::debug;
use reqwest::Client;
use std::io::Write;
use tokio_util::sync::CancellationToken;

use crate::download::DownloadProgress;
use crate::error::{PeekError, classify_status, classify_transport};

/// Size of each write to disk. Progress is reported and cancellation is
/// checked once per chunk.
pub const CHUNK_SIZE: usize = 1024;

/// Thin wrapper over reqwest that streams response bodies into a writer.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Streams `url` into the writer returned by `create_writer`.
    ///
    /// The writer is only created once the server has answered with a success
    /// status, and it is dropped on every return path. `on_progress` is called
    /// once before the first chunk and after every chunk written. A stalled
    /// body does not delay cancellation.
    #[tracing::instrument(skip(self, create_writer, cancel, on_progress))]
    pub async fn stream_to<W, F, P>(
        &self,
        url: &str,
        create_writer: F,
        cancel: &CancellationToken,
        mut on_progress: P,
    ) -> Result<DownloadProgress, PeekError>
    where
        W: Write,
        F: FnOnce() -> Result<W, PeekError>,
        P: FnMut(&DownloadProgress),
    {
        debug!("Downloading file from {}...", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(
                status,
                PeekError::UnexpectedStatus(status.as_u16()),
            ));
        }

        let total_bytes = response.content_length().unwrap_or(0);
        let mut writer = create_writer()?;
        let mut progress = DownloadProgress::new(total_bytes);
        on_progress(&progress);

        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(interrupted(&mut writer, &progress));
                }
                chunk = response.chunk() => match chunk {
                    Ok(Some(chunk)) => chunk,
                    Ok(None) => break,
                    Err(e) => return Err(classify_transport(&e)),
                },
            };

            for piece in chunk.chunks(CHUNK_SIZE) {
                if cancel.is_cancelled() {
                    return Err(interrupted(&mut writer, &progress));
                }
                writer.write_all(piece)?;
                progress.record(piece.len() as u64);
                on_progress(&progress);
            }
        }

        writer.flush()?;

        debug!(
            "Downloaded {:.2} MB",
            progress.bytes_written as f64 / (1024.0 * 1024.0)
        );

        Ok(progress)
    }
}

fn interrupted<W: Write>(writer: &mut W, progress: &DownloadProgress) -> PeekError {
    debug!(
        "Download cancelled after {} of {} bytes",
        progress.bytes_written, progress.total_bytes
    );
    if let Err(e) = writer.flush() {
        return PeekError::from(e);
    }
    PeekError::DownloadInterrupted
}
