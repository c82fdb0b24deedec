//! pwcheck: password strength checker with live analysis, breach lookup and generation.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod controller;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod rpc_handler;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
