use clap::{Args, Parser, Subcommand};
use shelf::filter::{SortKey, TypeFilter};
use shelf::model::{BookmarkKind, CategoryColor};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for dev builds.
/// Format: "0.3.2" when built outside git, "0.3.2@abc1234 2024-01-15" otherwise
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("SHELF_GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("SHELF_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "shelf", bin_name = "shelf", version = get_version())]
#[command(about = "Personal bookmark and app-shortcut organizer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Unlock the Private Space for this invocation
    #[arg(long, global = true, value_name = "PIN", help_heading = "Options")]
    pub pin: Option<String>,

    /// Use this data directory instead of $SHELF_HOME or the OS default
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List bookmarks (default)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show bookmarks in full
    #[command(alias = "show")]
    View {
        /// Bookmark ids or id prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Add a bookmark
    #[command(alias = "new")]
    Add(AddArgs),

    /// Edit a bookmark
    Edit(EditArgs),

    /// Delete bookmarks
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Pin bookmarks to the top of every list
    Pin {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Unpin bookmarks
    Unpin {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Toggle favorite on bookmarks
    #[command(alias = "fav")]
    Favorite {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Manage categories
    #[command(alias = "cat", subcommand)]
    Categories(CategoryCommands),

    /// Show or change display settings ("shelf settings reset" restores defaults)
    #[command(alias = "config")]
    Settings {
        /// Setting key, or "reset"
        key: Option<String>,
        /// New value
        value: Option<String>,
    },

    /// Manage the Private Space
    #[command(subcommand)]
    Private(PrivateCommands),

    /// Export a backup of bookmarks and categories
    Export {
        /// Output file or directory (defaults to the current directory)
        path: Option<PathBuf>,
        /// Write a gzip-compressed backup
        #[arg(short = 'z', long)]
        gzip: bool,
    },

    /// Replace bookmarks and categories from a backup
    Import {
        path: PathBuf,
    },

    /// Delete every bookmark
    Clear {
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by name (case-insensitive)
    pub search: Option<String>,

    /// Only bookmarks in this category (id, id prefix or name)
    #[arg(short, long, conflicts_with = "favorites")]
    pub category: Option<String>,

    /// Only favorites
    #[arg(short, long)]
    pub favorites: bool,

    /// website, app or all
    #[arg(short = 't', long = "type", default_value = "all")]
    pub kind: TypeFilter,

    /// name, rating or recent
    #[arg(short, long, default_value = "recent")]
    pub sort: SortKey,

    /// List the Private Space (needs --pin)
    #[arg(short, long)]
    pub private: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub name: String,
    pub url: String,

    /// Category id, id prefix or name; repeat for several
    #[arg(short, long = "category", required = true)]
    pub categories: Vec<String>,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(short, long, default_value = "")]
    pub notes: String,

    /// 0 (unrated) to 5
    #[arg(short, long, default_value_t = 0)]
    pub rating: u8,

    /// website or app
    #[arg(short = 't', long = "type", default_value = "website")]
    pub kind: BookmarkKind,

    /// Play Store link for apps
    #[arg(long)]
    pub play_store: Option<String>,

    #[arg(long)]
    pub pinned: bool,

    #[arg(long)]
    pub favorite: bool,

    /// Add to the Private Space
    #[arg(long)]
    pub private: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Bookmark id or id prefix
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    /// Replaces the category set; repeat for several
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub notes: Option<String>,

    #[arg(short, long)]
    pub rating: Option<u8>,

    #[arg(short = 't', long = "type")]
    pub kind: Option<BookmarkKind>,

    /// Play Store link; pass an empty string to remove it
    #[arg(long)]
    pub play_store: Option<String>,

    #[arg(long)]
    pub pinned: Option<bool>,

    #[arg(long)]
    pub favorite: Option<bool>,

    #[arg(long)]
    pub private: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with bookmark counts
    #[command(alias = "ls")]
    List {
        /// Count the Private Space instead (needs --pin)
        #[arg(short, long)]
        private: bool,
    },
    /// Add a category
    Add {
        name: String,
        /// blue, green, purple, pink, teal or orange
        #[arg(short, long, default_value = "blue")]
        color: CategoryColor,
    },
    /// Rename or recolor a category
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<CategoryColor>,
    },
    /// Delete a category; bookmarks left without a category are deleted too
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PrivateCommands {
    /// Show whether a PIN is set
    Status,
    /// Create the PIN (4-6 digits, entered twice)
    Setup { pin: String, confirm: String },
    /// Change the PIN
    Change {
        old: String,
        new: String,
        confirm: String,
    },
    /// Lock the Private Space
    Lock,
    /// Delete every private bookmark (needs --pin)
    Clear {
        #[arg(short, long)]
        yes: bool,
    },
}
