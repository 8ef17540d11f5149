//! # Dispatch
//!
//! - `run()`: parses arguments, sets up logging, opens the API and dispatches
//! - `handle_*()`: one per command; call the API and print the rendered result
//!
//! Handlers never touch business rules. Anything that decides what happens to the
//! data lives behind [`ShelfApi`](shelf::api::ShelfApi).

use super::render::{
    print_messages, render_access, render_bookmark_details, render_bookmarks, render_categories,
    render_settings,
};
use super::setup::{
    AddArgs, CategoryCommands, Cli, Commands, EditArgs, ListArgs, PrivateCommands,
};
use clap::Parser;
use shelf::commands::helpers::resolve_categories;
use shelf::commands::list::ListOptions;
use shelf::commands::update::BookmarkPatch;
use shelf::commands::{CmdResult, MessageLevel};
use shelf::error::{Result, ShelfError};
use shelf::filter::{View, FAVORITES_SENTINEL};
use shelf::init::{initialize, FsApi};
use shelf::model::BookmarkDraft;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut api = initialize(cli.data_dir.clone())?;
    if let Some(pin) = cli.pin.as_deref() {
        accepted(api.unlock(pin)?)?;
        debug!("private space unlocked for this invocation");
    }

    match cli.command {
        Some(Commands::List(args)) => handle_list(&api, args),
        Some(Commands::View { ids }) => handle_view(&api, &ids),
        Some(Commands::Add(args)) => handle_add(&mut api, args),
        Some(Commands::Edit(args)) => handle_edit(&mut api, args),
        Some(Commands::Delete { ids }) => report(api.delete_bookmarks(&ids)?),
        Some(Commands::Pin { ids }) => report(api.pin_bookmarks(&ids)?),
        Some(Commands::Unpin { ids }) => report(api.unpin_bookmarks(&ids)?),
        Some(Commands::Favorite { ids }) => report(api.toggle_favorites(&ids)?),
        Some(Commands::Categories(cmd)) => handle_categories(&mut api, cmd),
        Some(Commands::Settings { key, value }) => handle_settings(&mut api, key, value),
        Some(Commands::Private(cmd)) => handle_private(&mut api, cmd),
        Some(Commands::Export { path, gzip }) => handle_export(&api, path, gzip),
        Some(Commands::Import { path }) => report(api.import_backup(&path)?),
        Some(Commands::Clear { yes }) => {
            confirm(yes, "delete every bookmark")?;
            report(api.clear_bookmarks()?)
        }
        None => handle_list(&api, ListArgs::default()),
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "shelf=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Turns a rejected PIN check into an error, so the process exits non-zero.
fn accepted(result: CmdResult) -> Result<CmdResult> {
    if result.accepted == Some(false) {
        let reason = result
            .messages
            .iter()
            .find(|m| m.level == MessageLevel::Error)
            .map(|m| m.content.clone())
            .unwrap_or_else(|| "Rejected".to_string());
        return Err(ShelfError::Rejected(reason));
    }
    Ok(result)
}

fn confirm(yes: bool, action: &str) -> Result<()> {
    if yes {
        Ok(())
    } else {
        Err(ShelfError::Api(format!(
            "Refusing to {} without --yes",
            action
        )))
    }
}

fn report(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &FsApi, args: ListArgs) -> Result<()> {
    let category = if args.favorites {
        Some(FAVORITES_SENTINEL.to_string())
    } else {
        args.category
    };
    let options = ListOptions {
        view: if args.private { View::Private } else { View::Main },
        search: args.search.unwrap_or_default(),
        category,
        kind: args.kind,
        sort: args.sort,
    };

    let result = api.list(&options)?;
    print!("{}", render_bookmarks(&result.listed_bookmarks, api.state()));
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &FsApi, ids: &[String]) -> Result<()> {
    let result = api.view_bookmarks(ids)?;
    print!(
        "{}",
        render_bookmark_details(&result.listed_bookmarks, api.state())
    );
    Ok(())
}

fn handle_add(api: &mut FsApi, args: AddArgs) -> Result<()> {
    let category_ids = resolve_categories(api.state(), &args.categories)?;
    let draft = BookmarkDraft {
        name: args.name,
        url: args.url,
        category_ids,
        description: args.description,
        notes: args.notes,
        rating: args.rating,
        kind: args.kind,
        play_store_url: args.play_store,
        pinned: args.pinned,
        favorite: args.favorite,
        private: args.private,
    };
    report(api.create_bookmark(draft)?)
}

fn handle_edit(api: &mut FsApi, args: EditArgs) -> Result<()> {
    let category_ids = if args.categories.is_empty() {
        None
    } else {
        Some(resolve_categories(api.state(), &args.categories)?)
    };
    let patch = BookmarkPatch {
        name: args.name,
        url: args.url,
        category_ids,
        description: args.description,
        notes: args.notes,
        rating: args.rating,
        kind: args.kind,
        play_store_url: args
            .play_store
            .map(|link| Some(link).filter(|l| !l.trim().is_empty())),
        pinned: args.pinned,
        favorite: args.favorite,
        private: args.private,
    };
    report(api.patch_bookmark(&args.id, patch)?)
}

fn handle_categories(api: &mut FsApi, cmd: CategoryCommands) -> Result<()> {
    match cmd {
        CategoryCommands::List { private } => {
            let view = if private { View::Private } else { View::Main };
            let result = api.list_categories(view)?;
            print!(
                "{}",
                render_categories(&result.categories, result.view_total)
            );
            print_messages(&result.messages);
            Ok(())
        }
        CategoryCommands::Add { name, color } => report(api.add_category(&name, color)?),
        CategoryCommands::Edit { id, name, color } => {
            report(api.update_category(&id, name.as_deref(), color)?)
        }
        CategoryCommands::Delete { id } => report(api.delete_category(&id)?),
    }
}

fn handle_settings(api: &mut FsApi, key: Option<String>, value: Option<String>) -> Result<()> {
    let result = match (key.as_deref(), value.as_deref()) {
        (Some("reset"), None) => api.reset_settings()?,
        (Some(key), Some(value)) => api.set_setting(key, value)?,
        (key, _) => api.show_settings(key)?,
    };
    print!("{}", render_settings(&result.settings));
    print_messages(&result.messages);
    Ok(())
}

fn handle_private(api: &mut FsApi, cmd: PrivateCommands) -> Result<()> {
    let result = match cmd {
        PrivateCommands::Status => {
            let result = api.private_status()?;
            if let Some(state) = result.access {
                print!("{}", render_access(state));
            }
            return Ok(());
        }
        PrivateCommands::Setup { pin, confirm: again } => api.setup_pin(&pin, &again)?,
        PrivateCommands::Change { old, new, confirm: again } => {
            api.change_pin(&old, &new, &again)?
        }
        PrivateCommands::Lock => api.lock()?,
        PrivateCommands::Clear { yes } => {
            confirm(yes, "delete every private bookmark")?;
            api.clear_private()?
        }
    };
    report(accepted(result)?)
}

fn handle_export(api: &FsApi, path: Option<PathBuf>, gzip: bool) -> Result<()> {
    let result = api.export_backup(path.as_deref(), gzip)?;
    if let Some(written) = result.paths.first() {
        debug!(path = %written.display(), "backup written");
    }
    report(result)
}
