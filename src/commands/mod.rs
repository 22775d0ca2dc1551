use anyhow::Result;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use crate::{
    asset::{ReleaseAsset, choose, render_assets},
    download::{DownloadReport, download_asset},
    error::PeekError,
    format::pretty_bytes,
    github::{GitHubRepo, ReleaseInfo, ReleaseSource},
    platform::DefaultPlatformDetector,
    runtime::Runtime,
    settings::{FileSettingsStore, SettingsStore},
};

pub mod config;
mod paths;
mod progress;

pub use paths::{default_download_dir, resolve_download_dir};
pub use progress::ProgressDisplay;

use config::Config;

/// Look up the latest release of `repo`, let the user pick an asset and
/// download it.
#[tracing::instrument(skip(runtime, download_dir, api_url))]
pub async fn peek<R: Runtime + 'static>(
    runtime: R,
    repo: &GitHubRepo,
    download_dir: Option<PathBuf>,
    save_dir: bool,
    api_url: Option<String>,
) -> Result<()> {
    let download_dir = {
        let store = FileSettingsStore::in_config_dir(&runtime);
        let dir = resolve_download_dir(&runtime, store.as_ref(), download_dir)?;
        if save_dir {
            match &store {
                Some(store) => {
                    store.write(&dir)?;
                    info!("Saved {} as the default download directory", dir.display());
                }
                None => warn!("No config directory available; not saving the download directory"),
            }
        }
        dir
    };

    let config = Config::new(runtime, &DefaultPlatformDetector, download_dir, api_url)?;

    let (_release, asset) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        select_asset(repo, &config, &mut input, &mut io::stdout()).await?
    };

    // Ctrl-C is only trapped while bytes are flowing; at the prompt it keeps
    // its default behavior.
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let ctrl_c_handler = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let result = download_selected(&config, &asset, &cancel, &mut io::stdout()).await;

    ctrl_c_handler.abort();

    if let Err(PeekError::DownloadInterrupted) = &result {
        eprintln!("\nDownload interrupted. Run again to restart it from the beginning.");
    }
    result?;
    Ok(())
}

/// Validate the repository, fetch its latest release, list the annotated
/// assets and read the user's choice from `input`.
#[tracing::instrument(skip(config, input, output))]
pub async fn select_asset<R, G, I, O>(
    repo: &GitHubRepo,
    config: &Config<R, G>,
    input: &mut I,
    output: &mut O,
) -> Result<(ReleaseInfo, ReleaseAsset), PeekError>
where
    R: Runtime,
    G: ReleaseSource,
    I: BufRead,
    O: Write,
{
    writeln!(output, "Checking release assets for `{}`", repo.html_url())?;

    config.github.validate(repo).await?;
    let raw = config.github.fetch_latest_release(repo).await?;
    let release = ReleaseInfo::from_raw(raw, &config.profile);

    writeln!(output, "The latest release version / tag: {}", release.tag_name)?;
    writeln!(
        output,
        "There are {} assets available in the latest release.\n",
        release.assets.len()
    )?;
    write!(output, "{}", render_assets(&release.assets))?;

    let asset = choose(&release.assets, input, output)?;
    Ok((release, asset))
}

/// Stream the chosen asset into the configured download directory.
#[tracing::instrument(skip(config, asset, cancel, output), fields(asset = %asset.name))]
pub async fn download_selected<R, G, O>(
    config: &Config<R, G>,
    asset: &ReleaseAsset,
    cancel: &CancellationToken,
    output: &mut O,
) -> Result<DownloadReport, PeekError>
where
    R: Runtime,
    G: ReleaseSource,
    O: Write,
{
    writeln!(
        output,
        "Downloading {} ({}) to {}",
        asset.name,
        pretty_bytes(asset.size_bytes),
        config.download_dir.display()
    )?;
    output.flush()?;

    let mut display = ProgressDisplay::new();
    let result = download_asset(
        &config.runtime,
        &config.http_client,
        &asset.download_url,
        &config.download_dir,
        &asset.name,
        cancel,
        |progress| display.update(progress),
    )
    .await;

    match result {
        Ok(report) => {
            writeln!(output, "{}", display.finish(report.bytes_written, report.elapsed))?;
            writeln!(output, "Saved to {}", report.path.display())?;
            Ok(report)
        }
        Err(e) => {
            display.abandon();
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{GitHub, MockReleaseSource, RawAsset, RawRelease};
    use crate::http::HttpClient;
    use crate::platform::{OsFamily, PlatformProfile};
    use crate::runtime::RealRuntime;
    use mockito::Server;
    use reqwest::Client;
    use serde_json::json;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn linux_arm64() -> PlatformProfile {
        PlatformProfile::new(OsFamily::Linux, ["arm64", "aarch64"])
    }

    fn mock_config(github: MockReleaseSource, download_dir: PathBuf) -> Config<RealRuntime, MockReleaseSource> {
        Config {
            runtime: RealRuntime,
            github,
            http_client: HttpClient::new(Client::new()),
            profile: linux_arm64(),
            download_dir,
        }
    }

    #[tokio::test]
    async fn test_widget_release_end_to_end() {
        let mut server = Server::new_async().await;
        let url = server.url();
        let payload = vec![7u8; 5000];

        let _user = server.mock("GET", "/users/acme").with_status(200).with_body("{}").create_async().await;
        let _repo = server
            .mock("GET", "/repos/acme/widget")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let _release = server
            .mock("GET", "/repos/acme/widget/releases/latest")
            .with_status(200)
            .with_body(
                json!({
                    "tag_name": "v1.4.0",
                    "assets": [
                        {"name": "widget-windows-amd64.zip", "browser_download_url": format!("{}/dl/win", url), "size": 1000, "content_type": "application/zip"},
                        {"name": "widget-linux-arm64.tar.gz", "browser_download_url": format!("{}/dl/widget-linux-arm64.tar.gz", url), "size": 5000, "content_type": "application/gzip"},
                        {"name": "widget-linux-amd64.tar.gz", "browser_download_url": format!("{}/dl/amd64", url), "size": 6000, "content_type": "application/gzip"}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let download = server
            .mock("GET", "/dl/widget-linux-arm64.tar.gz")
            .with_status(200)
            .with_body(payload.clone())
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let config = Config {
            runtime: RealRuntime,
            github: GitHub::new(Client::new(), Some(url.clone())),
            http_client: HttpClient::new(Client::new()),
            profile: linux_arm64(),
            download_dir: dir.path().join("downloads"),
        };
        let repo = GitHubRepo::new("acme", "widget");
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();

        let (release, asset) = select_asset(&repo, &config, &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(release.tag_name, "v1.4.0");
        assert_eq!(release.assets.len(), 3);
        assert!(release.assets[1].recommended);
        assert!(!release.assets[0].recommended);
        assert!(!release.assets[2].recommended);
        assert_eq!(asset.name, "widget-linux-arm64.tar.gz");

        let listing = String::from_utf8(output).unwrap();
        assert!(listing.contains("Checking release assets for `https://github.com/acme/widget`"));
        assert!(listing.contains("v1.4.0"));
        assert!(listing.contains("2. widget-linux-arm64.tar.gz"));

        let cancel = CancellationToken::new();
        let mut output = Vec::new();
        let report = download_selected(&config, &asset, &cancel, &mut output)
            .await
            .unwrap();

        download.assert_async().await;
        assert_eq!(report.bytes_written, 5000);
        let saved = dir.path().join("downloads").join("widget-linux-arm64.tar.gz");
        assert_eq!(report.path, saved);
        assert_eq!(std::fs::metadata(&saved).unwrap().len(), asset.size_bytes);
        let summary = String::from_utf8(output).unwrap();
        assert!(summary.contains("Downloaded 4.88 KiB"));
    }

    #[tokio::test]
    async fn test_release_without_assets() {
        let mut github = MockReleaseSource::new();
        github.expect_validate().returning(|_| Ok(()));
        github.expect_fetch_latest_release().returning(|_| {
            Ok(RawRelease {
                tag_name: "v0.1.0".into(),
                assets: vec![],
            })
        });
        let config = mock_config(github, PathBuf::from("/unused"));
        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();

        let err = select_asset(&GitHubRepo::new("acme", "empty"), &config, &mut input, &mut output)
            .await
            .unwrap_err();

        assert_eq!(err, PeekError::NoReleasesOrAssets);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("There are 0 assets"));
    }

    #[tokio::test]
    async fn test_validation_failure_skips_release_lookup() {
        let mut github = MockReleaseSource::new();
        github
            .expect_validate()
            .returning(|_| Err(PeekError::RepoNotFound));
        github.expect_fetch_latest_release().times(0);
        let config = mock_config(github, PathBuf::from("/unused"));
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let err = select_asset(&GitHubRepo::new("acme", "missing"), &config, &mut input, &mut output)
            .await
            .unwrap_err();

        assert_eq!(err, PeekError::RepoNotFound);
    }

    #[tokio::test]
    async fn test_selection_cancelled_on_eof() {
        let mut github = MockReleaseSource::new();
        github.expect_validate().returning(|_| Ok(()));
        github.expect_fetch_latest_release().returning(|_| {
            Ok(RawRelease {
                tag_name: "v1".into(),
                assets: vec![RawAsset {
                    name: "tool.zip".into(),
                    browser_download_url: "https://example.com/tool.zip".into(),
                    size: 1,
                    content_type: String::new(),
                }],
            })
        });
        let config = mock_config(github, PathBuf::from("/unused"));
        let mut input = Cursor::new("9\n");
        let mut output = Vec::new();

        let err = select_asset(&GitHubRepo::new("acme", "tool"), &config, &mut input, &mut output)
            .await
            .unwrap_err();

        assert_eq!(err, PeekError::SelectionCancelled);
        assert!(String::from_utf8(output).unwrap().contains("'9' is not a valid choice"));
    }

    #[tokio::test]
    async fn test_download_failure_is_reported() {
        let mut server = Server::new_async().await;
        let _mock = server.mock("GET", "/gone.zip").with_status(500).create_async().await;
        let dir = tempdir().unwrap();
        let config = mock_config(MockReleaseSource::new(), dir.path().to_path_buf());
        let asset = ReleaseAsset {
            index: 1,
            name: "gone.zip".into(),
            download_url: format!("{}/gone.zip", server.url()),
            size_bytes: 10,
            content_type: String::new(),
            detected_arch: None,
            recommended: false,
        };

        let err = download_selected(&config, &asset, &CancellationToken::new(), &mut Vec::new())
            .await
            .unwrap_err();

        assert_eq!(err, PeekError::UnexpectedStatus(500));
        assert!(!dir.path().join("gone.zip").exists());
    }
}
