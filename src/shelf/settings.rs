//! # Display Settings
//!
//! [`AppSettings`] is the user's configuration record, persisted under the
//! `app-settings` key. It is changed one field at a time through [`Setting`], a closed
//! sum type with one variant per field, so every field change is an exhaustive match
//! rather than a string lookup.
//!
//! ## Available Settings
//!
//! | Key | Default | Values |
//! |-----|---------|--------|
//! | `theme-mode` | `auto` | `light`, `dark`, `auto` |
//! | `card-size` | `medium` | `small`, `medium`, `large` |
//! | `layout-view` | `grid` | `list`, `grid` |
//! | `grid-columns` | `auto` | `2`, `3`, `auto` |
//! | `show-descriptions` | `true` | boolean |
//! | `show-notes` | `true` | boolean |
//! | `accent-color` | `#3b82f6` | any color string |
//! | `hover-board-position` | `bottom` | `top`, `bottom` |
//! | `hide-links-from-all` | `false` | boolean |
//!
//! Stored records missing a field pick up its default.

use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ACCENT_COLOR: &str = "#3b82f6";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutView {
    List,
    #[default]
    Grid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridColumns {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[default]
    #[serde(rename = "auto")]
    Auto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardPosition {
    Top,
    #[default]
    Bottom,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }
}

impl CardSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardSize::Small => "small",
            CardSize::Medium => "medium",
            CardSize::Large => "large",
        }
    }
}

impl LayoutView {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutView::List => "list",
            LayoutView::Grid => "grid",
        }
    }
}

impl GridColumns {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridColumns::Two => "2",
            GridColumns::Three => "3",
            GridColumns::Auto => "auto",
        }
    }
}

impl BoardPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPosition::Top => "top",
            BoardPosition::Bottom => "bottom",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            _ => Err(format!("expected light, dark or auto, got '{}'", s)),
        }
    }
}

impl FromStr for CardSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "small" => Ok(CardSize::Small),
            "medium" => Ok(CardSize::Medium),
            "large" => Ok(CardSize::Large),
            _ => Err(format!("expected small, medium or large, got '{}'", s)),
        }
    }
}

impl FromStr for LayoutView {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "list" => Ok(LayoutView::List),
            "grid" => Ok(LayoutView::Grid),
            _ => Err(format!("expected list or grid, got '{}'", s)),
        }
    }
}

impl FromStr for GridColumns {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "2" => Ok(GridColumns::Two),
            "3" => Ok(GridColumns::Three),
            "auto" => Ok(GridColumns::Auto),
            _ => Err(format!("expected 2, 3 or auto, got '{}'", s)),
        }
    }
}

impl FromStr for BoardPosition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "top" => Ok(BoardPosition::Top),
            "bottom" => Ok(BoardPosition::Bottom),
            _ => Err(format!("expected top or bottom, got '{}'", s)),
        }
    }
}

fn default_accent_color() -> String {
    DEFAULT_ACCENT_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub card_size: CardSize,
    #[serde(default = "default_true")]
    pub show_descriptions: bool,
    #[serde(default = "default_true")]
    pub show_notes: bool,
    #[serde(default)]
    pub layout_view: LayoutView,
    #[serde(default)]
    pub grid_columns: GridColumns,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default)]
    pub hover_board_position: BoardPosition,
    #[serde(default)]
    pub hide_links_from_all: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Auto,
            card_size: CardSize::Medium,
            show_descriptions: true,
            show_notes: true,
            layout_view: LayoutView::Grid,
            grid_columns: GridColumns::Auto,
            accent_color: default_accent_color(),
            hover_board_position: BoardPosition::Bottom,
            hide_links_from_all: false,
        }
    }
}

/// A single settings field together with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    ThemeMode(ThemeMode),
    CardSize(CardSize),
    ShowDescriptions(bool),
    ShowNotes(bool),
    LayoutView(LayoutView),
    GridColumns(GridColumns),
    AccentColor(String),
    HoverBoardPosition(BoardPosition),
    HideLinksFromAll(bool),
}

/// Setting keys in display order.
pub const SETTING_KEYS: [&str; 9] = [
    "theme-mode",
    "card-size",
    "layout-view",
    "grid-columns",
    "show-descriptions",
    "show-notes",
    "accent-color",
    "hover-board-position",
    "hide-links-from-all",
];

/// Folds `themeMode`, `theme-mode` and `theme_mode` into one lookup form.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(format!("expected true or false, got '{}'", value)),
    }
}

impl Setting {
    /// Parses a textual `key value` pair, as typed on the command line.
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        let invalid = |reason: String| ShelfError::Validation(format!("{}: {}", key, reason));
        let value = value.trim();

        let setting = match normalize_key(key).as_str() {
            "thememode" | "theme" => Setting::ThemeMode(value.parse().map_err(invalid)?),
            "cardsize" => Setting::CardSize(value.parse().map_err(invalid)?),
            "showdescriptions" => Setting::ShowDescriptions(parse_bool(value).map_err(invalid)?),
            "shownotes" => Setting::ShowNotes(parse_bool(value).map_err(invalid)?),
            "layoutview" | "layout" => Setting::LayoutView(value.parse().map_err(invalid)?),
            "gridcolumns" | "columns" => Setting::GridColumns(value.parse().map_err(invalid)?),
            "accentcolor" | "accent" => {
                if value.is_empty() {
                    return Err(invalid("color cannot be empty".into()));
                }
                Setting::AccentColor(value.to_string())
            }
            "hoverboardposition" | "boardposition" => {
                Setting::HoverBoardPosition(value.parse().map_err(invalid)?)
            }
            "hidelinksfromall" | "hidelinks" => {
                Setting::HideLinksFromAll(parse_bool(value).map_err(invalid)?)
            }
            _ => return Err(ShelfError::Api(format!("Unknown setting: {}", key))),
        };
        Ok(setting)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Setting::ThemeMode(_) => "theme-mode",
            Setting::CardSize(_) => "card-size",
            Setting::ShowDescriptions(_) => "show-descriptions",
            Setting::ShowNotes(_) => "show-notes",
            Setting::LayoutView(_) => "layout-view",
            Setting::GridColumns(_) => "grid-columns",
            Setting::AccentColor(_) => "accent-color",
            Setting::HoverBoardPosition(_) => "hover-board-position",
            Setting::HideLinksFromAll(_) => "hide-links-from-all",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Setting::ThemeMode(v) => v.as_str().to_string(),
            Setting::CardSize(v) => v.as_str().to_string(),
            Setting::ShowDescriptions(v) | Setting::ShowNotes(v) | Setting::HideLinksFromAll(v) => {
                v.to_string()
            }
            Setting::LayoutView(v) => v.as_str().to_string(),
            Setting::GridColumns(v) => v.as_str().to_string(),
            Setting::AccentColor(v) => v.clone(),
            Setting::HoverBoardPosition(v) => v.as_str().to_string(),
        };
        write!(f, "{} = {}", self.key(), value)
    }
}

impl AppSettings {
    /// Returns a copy with exactly one field replaced.
    pub fn update(&self, setting: Setting) -> AppSettings {
        let mut next = self.clone();
        match setting {
            Setting::ThemeMode(v) => next.theme_mode = v,
            Setting::CardSize(v) => next.card_size = v,
            Setting::ShowDescriptions(v) => next.show_descriptions = v,
            Setting::ShowNotes(v) => next.show_notes = v,
            Setting::LayoutView(v) => next.layout_view = v,
            Setting::GridColumns(v) => next.grid_columns = v,
            Setting::AccentColor(v) => next.accent_color = v,
            Setting::HoverBoardPosition(v) => next.hover_board_position = v,
            Setting::HideLinksFromAll(v) => next.hide_links_from_all = v,
        }
        next
    }

    pub fn reset() -> AppSettings {
        AppSettings::default()
    }

    /// Current value of one field, keyed like [`Setting::parse`].
    pub fn get(&self, key: &str) -> Result<Setting> {
        let setting = match normalize_key(key).as_str() {
            "thememode" | "theme" => Setting::ThemeMode(self.theme_mode),
            "cardsize" => Setting::CardSize(self.card_size),
            "showdescriptions" => Setting::ShowDescriptions(self.show_descriptions),
            "shownotes" => Setting::ShowNotes(self.show_notes),
            "layoutview" | "layout" => Setting::LayoutView(self.layout_view),
            "gridcolumns" | "columns" => Setting::GridColumns(self.grid_columns),
            "accentcolor" | "accent" => Setting::AccentColor(self.accent_color.clone()),
            "hoverboardposition" | "boardposition" => {
                Setting::HoverBoardPosition(self.hover_board_position)
            }
            "hidelinksfromall" | "hidelinks" => Setting::HideLinksFromAll(self.hide_links_from_all),
            _ => return Err(ShelfError::Api(format!("Unknown setting: {}", key))),
        };
        Ok(setting)
    }

    /// All fields in display order.
    pub fn entries(&self) -> Vec<Setting> {
        SETTING_KEYS
            .iter()
            .filter_map(|key| self.get(key).ok())
            .collect()
    }

    /// Number of columns at the widest breakpoint.
    pub fn columns(&self) -> usize {
        match (self.layout_view, self.grid_columns) {
            (LayoutView::List, _) => 1,
            (LayoutView::Grid, GridColumns::Two) => 2,
            (LayoutView::Grid, GridColumns::Three) => 3,
            (LayoutView::Grid, GridColumns::Auto) => match self.card_size {
                CardSize::Small => 4,
                CardSize::Medium => 3,
                CardSize::Large => 2,
            },
        }
    }
}
