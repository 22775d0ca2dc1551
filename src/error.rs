//! Error taxonomy shared by every stage of the pipeline.

use reqwest::StatusCode;

/// Failure kinds surfaced by the core components.
///
/// Every stage returns one of these instead of panicking so the caller can
/// pick a message and an exit code with a single exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeekError {
    /// The account lookup did not succeed.
    UserNotFound,
    /// The account exists but the repository lookup did not succeed.
    RepoNotFound,
    /// The API refused the request because of rate limiting (HTTP 403 or 429).
    RateLimited,
    /// The request never produced a usable response.
    ConnectionFailed,
    /// The latest release has nothing to choose from.
    NoReleasesOrAssets,
    /// Any other non-success status.
    UnexpectedStatus(u16),
    /// The download was cancelled before the body was fully written.
    DownloadInterrupted,
    /// Input closed while waiting for a selection.
    SelectionCancelled,
    /// Local I/O failed (creating directories, writing the file, reading input).
    Io(String),
}

impl PeekError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PeekError::UserNotFound | PeekError::RepoNotFound => 2,
            PeekError::RateLimited => 3,
            PeekError::ConnectionFailed => 4,
            PeekError::NoReleasesOrAssets => 5,
            PeekError::UnexpectedStatus(_) => 6,
            PeekError::DownloadInterrupted | PeekError::SelectionCancelled => 130,
            PeekError::Io(_) => 1,
        }
    }
}

impl std::fmt::Display for PeekError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeekError::UserNotFound => {
                write!(f, "User not found. Make sure the username is spelled correctly.")
            }
            PeekError::RepoNotFound => write!(
                f,
                "Repository not found. Make sure the name is spelled correctly; private repositories are not supported."
            ),
            PeekError::RateLimited => write!(
                f,
                "GitHub API rate limit exceeded for your IP. Try again later."
            ),
            PeekError::ConnectionFailed => write!(
                f,
                "Connection error. Make sure you are connected to the internet and try again."
            ),
            PeekError::NoReleasesOrAssets => {
                write!(f, "The latest release has no downloadable assets.")
            }
            PeekError::UnexpectedStatus(code) => {
                write!(f, "Unexpected response from GitHub: HTTP {}", code)
            }
            PeekError::DownloadInterrupted => write!(f, "Download interrupted."),
            PeekError::SelectionCancelled => write!(f, "Selection cancelled."),
            PeekError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for PeekError {}

impl From<std::io::Error> for PeekError {
    fn from(err: std::io::Error) -> Self {
        PeekError::Io(err.to_string())
    }
}

/// Returns true for the statuses GitHub uses to signal rate limiting.
pub fn is_rate_limited(status: StatusCode) -> bool {
    status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
}

/// Maps a non-success status to an error, using `not_found` for anything that
/// is not rate limiting.
pub fn classify_status(status: StatusCode, not_found: PeekError) -> PeekError {
    if is_rate_limited(status) {
        PeekError::RateLimited
    } else {
        not_found
    }
}

/// Transport-level failures (DNS, refused connections, truncated bodies).
pub fn classify_transport(error: &reqwest::Error) -> PeekError {
    log::debug!("Transport error: {}", error);
    match error.status() {
        Some(status) if is_rate_limited(status) => PeekError::RateLimited,
        Some(status) => PeekError::UnexpectedStatus(status.as_u16()),
        None => PeekError::ConnectionFailed,
    }
}
