use anyhow::Result;
use reqwest::Client;
use std::path::PathBuf;

use crate::{
    github::{GitHub, ReleaseSource},
    http::HttpClient,
    platform::{PlatformDetector, PlatformProfile},
    runtime::Runtime,
};

const USER_AGENT: &str = concat!("hub-peeker/", env!("HUB_PEEKER_VERSION"));

pub struct Config<R: Runtime, G: ReleaseSource> {
    pub runtime: R,
    pub github: G,
    pub http_client: HttpClient,
    pub profile: PlatformProfile,
    pub download_dir: PathBuf,
}

impl<R: Runtime> Config<R, GitHub> {
    pub fn new<D: PlatformDetector>(
        runtime: R,
        detector: &D,
        download_dir: PathBuf,
        api_url: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        let github = GitHub::new(client.clone(), api_url);
        let http_client = HttpClient::new(client);

        Ok(Self {
            runtime,
            github,
            http_client,
            profile: detector.detect(),
            download_dir,
        })
    }
}
