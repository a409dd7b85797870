// ABOUTME: Library root for cutover - blue/green stack-swap orchestration.
// ABOUTME: Handlers and builders invoked by an external deployment-automation engine.

pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod init;
pub mod platform;
pub mod revision;
pub mod signal;
pub mod stackref;
pub mod submit;
pub mod types;
