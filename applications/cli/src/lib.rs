/// Encore CLI - drives the playback engine against the in-memory catalog
pub mod config;
pub mod display;
pub mod error;
pub mod session;
