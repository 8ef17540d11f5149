//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for all shelf operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the in-memory [`AppState`] and the injected [`DataStore`]
//! - **Loads** every persisted key once, in [`ShelfApi::new`]
//! - **Dispatches** to the matching command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O on the terminal**: No stdout, stderr, or formatting
//!
//! ## Session State
//!
//! The Private Space unlock flag lives in the `AppState` held here and nowhere else.
//! Dropping the API ends the session; a new one always starts locked.
//!
//! ## Selectors
//!
//! Bookmarks and categories are addressed by id or by a unique id prefix, like git
//! commits. Categories also match by name. See [`commands::helpers`].
//!
//! ## Generic Over DataStore
//!
//! - Production: `ShelfApi<KvStore<FsBackend>>`
//! - Testing: `ShelfApi<KvStore<MemBackend>>`

use crate::commands::list::ListOptions;
use crate::commands::update::BookmarkPatch;
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::filter::View;
use crate::model::{AppState, BookmarkDraft, CategoryColor};
use crate::settings::Setting;
use crate::store::DataStore;
use std::path::Path;
use tracing::info;

/// The main API facade for shelf operations.
pub struct ShelfApi<S: DataStore> {
    store: S,
    state: AppState,
}

impl<S: DataStore> ShelfApi<S> {
    /// Loads all persisted state from `store`. The Private Space starts locked.
    pub fn new(store: S) -> Result<Self> {
        let state = store.load_state()?;
        info!(
            bookmarks = state.bookmarks.len(),
            categories = state.categories.len(),
            has_pin = state.private_space.has_pin(),
            "loaded shelf state"
        );
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Bookmarks ---

    pub fn list(&self, options: &ListOptions) -> Result<CmdResult> {
        commands::list::run(&self.state, options)
    }

    pub fn view_bookmarks<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        commands::list::view(&self.state, selectors)
    }

    pub fn create_bookmark(&mut self, draft: BookmarkDraft) -> Result<CmdResult> {
        let result = commands::create::run(&mut self.store, &mut self.state, draft)?;
        info!(count = result.affected_bookmarks.len(), "created bookmark");
        Ok(result)
    }

    pub fn update_bookmark(&mut self, selector: &str, draft: BookmarkDraft) -> Result<CmdResult> {
        let result = commands::update::run(&mut self.store, &mut self.state, selector, draft)?;
        info!(selector, "updated bookmark");
        Ok(result)
    }

    pub fn patch_bookmark(&mut self, selector: &str, patch: BookmarkPatch) -> Result<CmdResult> {
        let result = commands::update::patch(&mut self.store, &mut self.state, selector, patch)?;
        info!(selector, "patched bookmark");
        Ok(result)
    }

    pub fn delete_bookmarks<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.store, &mut self.state, selectors)?;
        info!(count = result.affected_bookmarks.len(), "deleted bookmarks");
        Ok(result)
    }

    pub fn pin_bookmarks<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        commands::flags::pin(&mut self.store, &mut self.state, selectors)
    }

    pub fn unpin_bookmarks<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        commands::flags::unpin(&mut self.store, &mut self.state, selectors)
    }

    pub fn toggle_favorites<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        commands::flags::toggle_favorite(&mut self.store, &mut self.state, selectors)
    }

    pub fn clear_bookmarks(&mut self) -> Result<CmdResult> {
        let result = commands::clear::run(&mut self.store, &mut self.state)?;
        info!("cleared all bookmarks");
        Ok(result)
    }

    // --- Categories ---

    pub fn list_categories(&self, view: View) -> Result<CmdResult> {
        commands::categories::list(&self.state, view)
    }

    pub fn add_category(&mut self, name: &str, color: CategoryColor) -> Result<CmdResult> {
        let result = commands::categories::add(&mut self.store, &mut self.state, name, color)?;
        info!(name, "added category");
        Ok(result)
    }

    pub fn update_category(
        &mut self,
        selector: &str,
        name: Option<&str>,
        color: Option<CategoryColor>,
    ) -> Result<CmdResult> {
        commands::categories::update(&mut self.store, &mut self.state, selector, name, color)
    }

    pub fn delete_category(&mut self, selector: &str) -> Result<CmdResult> {
        let before = self.state.bookmarks.len();
        let result = commands::categories::delete(&mut self.store, &mut self.state, selector)?;
        info!(
            selector,
            cascaded = before - self.state.bookmarks.len(),
            "deleted category"
        );
        Ok(result)
    }

    // --- Settings ---

    pub fn show_settings(&self, key: Option<&str>) -> Result<CmdResult> {
        commands::settings::show(&self.state, key)
    }

    pub fn update_setting(&mut self, setting: Setting) -> Result<CmdResult> {
        commands::settings::update(&mut self.store, &mut self.state, setting)
    }

    /// Parses and applies a textual `key value` pair.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<CmdResult> {
        let setting = Setting::parse(key, value)?;
        self.update_setting(setting)
    }

    pub fn reset_settings(&mut self) -> Result<CmdResult> {
        commands::settings::reset(&mut self.store, &mut self.state)
    }

    // --- Private Space ---

    pub fn private_status(&self) -> Result<CmdResult> {
        commands::private::status(&self.state)
    }

    pub fn setup_pin(&mut self, pin: &str, confirmation: &str) -> Result<CmdResult> {
        commands::private::setup(&mut self.store, &mut self.state, pin, confirmation)
    }

    pub fn unlock(&mut self, pin: &str) -> Result<CmdResult> {
        commands::private::unlock(&mut self.state, pin)
    }

    pub fn lock(&mut self) -> Result<CmdResult> {
        commands::private::lock(&mut self.state)
    }

    pub fn change_pin(&mut self, old_pin: &str, new_pin: &str, confirmation: &str) -> Result<CmdResult> {
        commands::private::change(
            &mut self.store,
            &mut self.state,
            old_pin,
            new_pin,
            confirmation,
        )
    }

    pub fn clear_private(&mut self) -> Result<CmdResult> {
        let result = commands::private::clear(&mut self.store, &mut self.state)?;
        info!(count = result.affected_bookmarks.len(), "cleared private bookmarks");
        Ok(result)
    }

    // --- Backups ---

    pub fn export_backup(&self, target: Option<&Path>, compress: bool) -> Result<CmdResult> {
        commands::export::run(&self.state, target, compress)
    }

    pub fn import_backup(&mut self, path: &Path) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.store, &mut self.state, path)?;
        info!(path = %path.display(), "imported backup");
        Ok(result)
    }
}
