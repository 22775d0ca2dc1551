use serde::{Deserialize, Serialize};

use crate::asset::{ReleaseAsset, annotate};
use crate::platform::PlatformProfile;

/// A release asset as returned by the GitHub API
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct RawAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content_type: String,
}

/// The `releases/latest` resource, reduced to the fields we use
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct RawRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<RawAsset>,
}

/// The latest release with its assets in API order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseInfo {
    /// Annotate a raw release against the host profile.
    pub fn from_raw(raw: RawRelease, profile: &PlatformProfile) -> Self {
        Self {
            assets: annotate(&raw.assets, profile),
            tag_name: raw.tag_name,
        }
    }
}
