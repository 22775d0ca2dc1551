//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the host, enabling
//! dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Standard directories (home, config, downloads)
//! - `fs` - File system operations (read, write, directory, file streams)
//! - `user` - User interaction (line prompts)

mod env;
mod fs;
mod user;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    /// Create (or truncate) a file for streaming writes.
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;

    // Directories
    fn home_dir(&self) -> Option<PathBuf>;
    fn config_dir(&self) -> Option<PathBuf>;
    fn download_dir(&self) -> Option<PathBuf>;

    // User interaction
    /// Print `prompt` and read one trimmed line from stdin.
    /// Returns `None` when stdin is closed.
    fn prompt(&self, prompt: &str) -> Result<Option<String>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config_dir_impl()
    }

    fn download_dir(&self) -> Option<PathBuf> {
        self.download_dir_impl()
    }

    fn prompt(&self, prompt: &str) -> Result<Option<String>> {
        self.prompt_impl(prompt)
    }
}
