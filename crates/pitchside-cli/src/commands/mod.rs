pub mod admin;
pub mod common;
pub mod completions;
pub mod config;
pub mod create;
pub mod list;
pub mod share;
pub mod show;
pub mod watch;
