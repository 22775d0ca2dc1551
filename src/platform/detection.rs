use log::debug;

/// The two spellings publishers use for 64-bit x86 builds.
pub const CANONICAL_64BIT_ALIASES: [&str; 2] = ["x86_64", "amd64"];

/// Operating system family as it appears in release filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Linux,
    Darwin,
    Other(String),
}

impl OsFamily {
    /// Map a raw OS name (e.g. `std::env::consts::OS`) to a family.
    pub fn from_os_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "windows" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            "macos" | "darwin" => OsFamily::Darwin,
            other => OsFamily::Other(other.to_string()),
        }
    }

    /// Lower-case token matched against asset names.
    pub fn token(&self) -> &str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
            OsFamily::Darwin => "darwin",
            OsFamily::Other(name) => name,
        }
    }
}

/// Raw host facts the profile is derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct HostInfo {
    pub os: String,
    pub machine: String,
    /// Pointer width as a bit string, e.g. `"64bit"`.
    pub bits: String,
}

impl HostInfo {
    /// Read the facts of the machine we are running on.
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            machine: std::env::consts::ARCH.to_string(),
            bits: format!("{}bit", usize::BITS),
        }
    }
}

/// OS family plus the ordered, deduplicated architecture aliases of the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformProfile {
    pub os_family: OsFamily,
    pub arch_aliases: Vec<String>,
}

impl PlatformProfile {
    /// Detect the current platform
    pub fn detect() -> Self {
        Self::from_host(&HostInfo::current())
    }

    /// Build a profile from explicit host facts.
    ///
    /// Alias order is significant: the matcher takes the first alias found in
    /// a filename. Machine synonyms come first, then the bit-string token, then
    /// the canonical 64-bit spellings whenever any raw token mentions "64".
    pub fn from_host(host: &HostInfo) -> Self {
        let machine = host.machine.trim().to_lowercase();
        let bits = host.bits.trim().to_lowercase();

        let mut aliases = Vec::new();
        for alias in machine_synonyms(&machine) {
            push_unique(&mut aliases, alias);
        }
        if !bits.is_empty() {
            push_unique(&mut aliases, bits.clone());
        }
        if machine.contains("64") || bits.contains("64") {
            for alias in CANONICAL_64BIT_ALIASES {
                push_unique(&mut aliases, alias.to_string());
            }
        }

        let profile = Self {
            os_family: OsFamily::from_os_name(&host.os),
            arch_aliases: aliases,
        };
        debug!("Detected platform profile: {:?}", profile);
        profile
    }

    /// Build a profile from a family and a hand-picked alias list.
    /// Duplicates are dropped; order is otherwise preserved.
    pub fn new<I, S>(os_family: OsFamily, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut arch_aliases = Vec::new();
        for alias in aliases {
            push_unique(&mut arch_aliases, alias.into().to_lowercase());
        }
        Self {
            os_family,
            arch_aliases,
        }
    }
}

fn machine_synonyms(machine: &str) -> Vec<String> {
    let synonyms: &[&str] = match machine {
        "" => &[],
        "x86_64" | "amd64" | "x64" => &["x86_64", "amd64"],
        "aarch64" | "arm64" => &["aarch64", "arm64"],
        "x86" | "i386" | "i686" => &["i686", "i386", "x86"],
        other => return vec![other.to_string()],
    };
    synonyms.iter().map(|s| s.to_string()).collect()
}

fn push_unique(aliases: &mut Vec<String>, alias: String) {
    if !aliases.contains(&alias) {
        aliases.push(alias);
    }
}

/// Trait for platform detection (useful for testing)
pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> PlatformProfile;
}

/// Detector backed by the running host.
pub struct DefaultPlatformDetector;

impl PlatformDetector for DefaultPlatformDetector {
    fn detect(&self) -> PlatformProfile {
        PlatformProfile::detect()
    }
}

/// A fixed profile, for callers that already know the target platform.
impl PlatformDetector for PlatformProfile {
    fn detect(&self) -> PlatformProfile {
        self.clone()
    }
}
