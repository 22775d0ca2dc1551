use anyhow::{Context, Result, bail};
use clap::Parser;
use hub_peeker::commands::peek;
use hub_peeker::error::PeekError;
use hub_peeker::github::GitHubRepo;
use hub_peeker::runtime::{RealRuntime, Runtime};
use std::path::PathBuf;

/// hub-peeker - download a release asset from GitHub
///
/// Looks up the latest release of a repository, marks the assets built for
/// this machine and downloads the one you pick.
///
/// Examples:
///   hub-peeker owner/repo                 # Latest release of owner/repo
///   hub-peeker -u owner -r repo -d /tmp   # Download into /tmp
///   hub-peeker -i                         # Ask for the username and repository
#[derive(Parser, Debug)]
#[command(author, version = env!("HUB_PEEKER_VERSION"), about)]
struct Cli {
    /// The GitHub repository in the format "owner/repo"
    #[arg(value_name = "OWNER/REPO", conflicts_with_all = ["username", "repo"])]
    target: Option<String>,

    /// GitHub user or organization that owns the repository
    #[arg(short, long, value_name = "USERNAME")]
    username: Option<String>,

    /// Repository name
    #[arg(short, long, value_name = "REPO")]
    repo: Option<String>,

    /// Prompt for the username and repository
    #[arg(short, long)]
    interactive: bool,

    /// Download directory (overrides the saved default; also via HUB_PEEKER_DOWNLOAD_DIR)
    #[arg(
        short = 'd',
        long = "dir",
        env = "HUB_PEEKER_DOWNLOAD_DIR",
        value_name = "PATH"
    )]
    download_dir: Option<PathBuf>,

    /// Remember the download directory for later runs
    #[arg(long)]
    save_dir: bool,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL")]
    api_url: Option<String>,
}

impl Cli {
    /// `prompt` is only consulted in interactive mode.
    fn resolve_repo<P>(&self, mut prompt: P) -> Result<GitHubRepo>
    where
        P: FnMut(&str) -> Result<Option<String>>,
    {
        if self.interactive {
            let owner = ask(&mut prompt, "GitHub Username: ")?;
            let repo = ask(&mut prompt, "Repository Name: ")?;
            return Ok(GitHubRepo::new(owner, repo));
        }
        if let Some(target) = &self.target {
            return target.parse();
        }
        match (&self.username, &self.repo) {
            (Some(owner), Some(repo)) => Ok(GitHubRepo::new(owner.as_str(), repo.as_str())),
            _ => bail!(
                "Please provide the <USERNAME> and <REPO>!\nRun `hub-peeker --help` for usage information."
            ),
        }
    }
}

fn ask<P>(prompt: &mut P, question: &str) -> Result<String>
where
    P: FnMut(&str) -> Result<Option<String>>,
{
    let answer = prompt(question)?.context("No input given")?;
    if answer.is_empty() {
        bail!("{} cannot be empty", question.trim_end_matches(": "));
    }
    Ok(answer)
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<PeekError>()
        .map(PeekError::exit_code)
        .unwrap_or(1)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let result = match cli.resolve_repo(|question| runtime.prompt(question)) {
        Ok(repo) => peek(runtime, &repo, cli.download_dir, cli.save_dir, cli.api_url).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}
