//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the player crates:
//! - Logging and tracing bootstrap
//! - Shared runtime error types
//!
//! ## Overview
//!
//! This crate establishes the logging conventions used throughout the
//! system. Applications call [`logging::init_logging`] once at startup;
//! library crates only emit `tracing` events and never install a
//! subscriber themselves.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
