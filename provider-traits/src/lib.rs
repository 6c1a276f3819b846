//! # File Provider Traits
//!
//! Storage-backend abstraction for enumerating and streaming playable
//! content. A provider resolves logical paths (relative to whatever root
//! the backend defines) into directory listings, metadata, and readable
//! byte streams.
//!
//! ## Overview
//!
//! This crate defines the contract between the player and its storage
//! backends. The local filesystem backend lives in `provider-local`;
//! remote backends (cloud drives, media servers) implement the same
//! [`FileProvider`] trait.
//!
//! Lookup failures are ordinary, checkable outcomes, not errors: a
//! missing directory lists as empty and a missing file opens as `None`.
//! [`ProviderError`] is reserved for infrastructure failures such as I/O
//! errors on an already-open stream.

pub mod error;
pub mod provider;

pub use error::{ProviderError, Result};
pub use provider::{FileInfo, FileMetadata, FileProvider, InputStream};
