use crate::github::RawAsset;
use crate::platform::PlatformProfile;

/// A release asset annotated for display and selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseAsset {
    /// 1-based position in the release listing.
    pub index: usize,
    pub name: String,
    pub download_url: String,
    pub size_bytes: u64,
    pub content_type: String,
    /// First profile alias found in the name.
    pub detected_arch: Option<String>,
    pub recommended: bool,
}

impl ReleaseAsset {
    /// The detected architecture, or `"none"`.
    pub fn arch_label(&self) -> &str {
        self.detected_arch.as_deref().unwrap_or("none")
    }
}

/// Annotate raw assets against a platform profile, preserving order.
///
/// The first alias (in profile order) contained in the lower-cased name is
/// recorded as the detected architecture and scanning stops there. An asset is
/// recommended when its name also contains the OS token.
pub fn annotate(assets: &[RawAsset], profile: &PlatformProfile) -> Vec<ReleaseAsset> {
    let os_token = profile.os_family.token();

    assets
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let name_lower = raw.name.to_lowercase();

            let detected_arch = profile
                .arch_aliases
                .iter()
                .find(|alias| !alias.is_empty() && name_lower.contains(alias.as_str()))
                .cloned();

            let os_match = !os_token.is_empty() && name_lower.contains(os_token);

            ReleaseAsset {
                index: i + 1,
                name: raw.name.clone(),
                download_url: raw.browser_download_url.clone(),
                size_bytes: raw.size,
                content_type: raw.content_type.clone(),
                recommended: os_match && detected_arch.is_some(),
                detected_arch,
            }
        })
        .collect()
}
