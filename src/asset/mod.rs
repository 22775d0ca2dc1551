//! Asset selection module
//!
//! This module annotates release assets against the host platform and lets
//! the user pick the one to download.

mod matcher;
mod picker;

pub use matcher::{ReleaseAsset, annotate};
pub use picker::{choose, parse_choice, render_assets};
