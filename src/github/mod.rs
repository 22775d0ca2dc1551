//! GitHub REST API access: account/repository validation and the latest
//! release listing.

mod client;
mod repo;
mod types;

#[cfg(test)]
pub use client::MockReleaseSource;
pub use client::{DEFAULT_API_URL, GitHub, ReleaseSource};
pub use repo::GitHubRepo;
pub use types::{RawAsset, RawRelease, ReleaseInfo};
