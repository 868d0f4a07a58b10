//! GitHub REST release API.

pub mod client;

pub use client::GitHubReleaseHost;
