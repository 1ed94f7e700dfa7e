//! e6finder is a chat-bot plugin core for e621/e926
//!
//! It turns chat commands into post queries (user tags, a group's constant tags and its rating
//! restriction), fetches posts from the board's json api and renders them through a
//! `{a.b|c}` message template. Per-group settings are kept as small json files.
#![forbid(
    clippy::missing_docs_in_private_items,
    missing_docs,
    rustdoc::missing_crate_level_docs
)]

/// the user agent sent when the config doesn't set one
pub static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub mod macros;

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod finder;
pub mod format;
pub mod host;
pub mod rating;
pub mod store;
pub mod tags;
pub mod template;
