//! # Command Layer
//!
//! This module contains the **core business logic** of shelf. Each command lives in its
//! own submodule and is a plain function over the in-memory [`AppState`] and the
//! [`DataStore`](crate::store::DataStore) that persists it.
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Implement the actual logic for each operation
//! - Enforce the Private Space gate on private bookmarks
//! - Persist a changed collection before committing it to the state, so a failed
//!   write leaves memory and storage in agreement
//! - Return structured [`CmdResult`] values with affected items and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: No stdout, stderr or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Prompts**: Double entry of PINs and confirmations happen in the UI
//!
//! ## Testing Strategy
//!
//! **This is where most of the testing lives.** Command tests run against
//! `KvStore<MemBackend>` and check both the returned `CmdResult` and what ended up in
//! the store.
//!
//! ## Command Modules
//!
//! - [`list`]: Derive the visible list for a view
//! - [`create`]: Add a bookmark
//! - [`update`]: Edit a bookmark
//! - [`delete`]: Remove bookmarks
//! - [`flags`]: Pin, unpin and toggle favorite
//! - [`categories`]: Category CRUD and the category board
//! - [`settings`]: Read, update and reset display settings
//! - [`private`]: PIN setup, unlock, lock, change and clearing private data
//! - [`clear`]: Delete every bookmark
//! - [`export`] / [`import`]: JSON backups
//! - [`helpers`]: Id prefix resolution and access checks

use crate::access::AccessState;
use crate::model::{Bookmark, Category};
use crate::settings::Setting;
use serde::Serialize;
use std::path::PathBuf;

pub mod categories;
pub mod clear;
pub mod create;
pub mod delete;
pub mod export;
pub mod flags;
pub mod helpers;
pub mod import;
pub mod list;
pub mod private;
pub mod settings;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A category with the number of bookmarks filed under it in one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_bookmarks: Vec<Bookmark>,
    pub listed_bookmarks: Vec<Bookmark>,
    pub categories: Vec<CategoryCount>,
    /// Size of the whole view before filters, when the command derived one.
    pub view_total: Option<usize>,
    pub settings: Vec<Setting>,
    pub access: Option<AccessState>,
    /// Whether a PIN check or PIN change succeeded.
    pub accepted: Option<bool>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_bookmarks(mut self, bookmarks: Vec<Bookmark>) -> Self {
        self.affected_bookmarks = bookmarks;
        self
    }

    pub fn with_listed_bookmarks(mut self, bookmarks: Vec<Bookmark>) -> Self {
        self.listed_bookmarks = bookmarks;
        self
    }

    pub fn with_settings(mut self, settings: Vec<Setting>) -> Self {
        self.settings = settings;
        self
    }
}
