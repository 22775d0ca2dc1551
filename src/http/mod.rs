//! HTTP client module for streaming downloads.

mod client;

pub use client::{CHUNK_SIZE, HttpClient};
