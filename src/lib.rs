pub mod asset;
pub mod commands;
pub mod download;
pub mod error;
pub mod format;
pub mod github;
pub mod http;
pub mod platform;
pub mod runtime;
pub mod settings;
