//! # Shelf Architecture
//!
//! Shelf is a **UI-agnostic bookmark organizer library**. It keeps websites and app
//! shortcuts in categories, lets the user pin and favorite them, and hides a PIN-gated
//! "Private Space" partition from the main list. The `shelf` binary is one client of
//! this library; nothing below the CLI layer knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the AppState and the injected DataStore             │
//! │  - Resolves id prefixes, gates private items, persists      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic over AppState                        │
//! │  - Built on the engine: filter.rs, access.rs, settings.rs   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait over a raw key-value StorageBackend      │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments, returns `Result<CmdResult>`,
//! and never prints or exits. Logging goes through `tracing`; installing a subscriber
//! is the binary's job.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`access`]: Private Space PIN state machine
//! - [`filter`]: The view derivation engine (partition, filter, sort, pin override)
//! - [`settings`]: Display settings with update/reset
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Bookmark`, `Category`, `AppState`)
//! - [`validation`]: Boundary checks for drafts and PINs
//! - [`init`]: Data directory discovery and API construction
//! - [`error`]: Error types

pub mod access;
pub mod api;
pub mod commands;
pub mod error;
pub mod filter;
pub mod init;
pub mod model;
pub mod settings;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
