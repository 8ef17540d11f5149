//! # CLI Behavior
//!
//! This is **one possible UI client** for shelf, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes, and output
//! formatting.
//!
//! ## Naked Execution (`shelf`)
//!
//! Running `shelf` with no arguments lists the main view, like `shelf list`.
//!
//! ## Private Space Sessions
//!
//! Every invocation is a fresh session and starts locked. Pass `--pin <PIN>` to
//! unlock for that one invocation: `shelf --pin 1234 list --private`. A wrong PIN
//! aborts before the command runs.
//!
//! ## Addressing
//!
//! Bookmarks are addressed by id or any unique id prefix, as printed by `list`.
//! Categories also accept their name.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. The level comes from `RUST_LOG`;
//! without it, `-v` shows debug events from shelf and the default shows warnings.

mod commands;
mod render;
mod setup;

pub use commands::run;
