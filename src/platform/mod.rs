//! Platform detection module
//!
//! This module derives the host's OS family and the set of CPU architecture
//! spellings that release filenames may use for it.

mod detection;

pub use detection::{
    CANONICAL_64BIT_ALIASES, DefaultPlatformDetector, HostInfo, OsFamily, PlatformDetector,
    PlatformProfile,
};
