//! # Rendering
//!
//! Turns command results into terminal text. Every `render_*` function returns a
//! `String` so output can be tested without a terminal; the handlers print it.
//!
//! Layout math (width, truncation, padding) happens on plain text, and color is
//! applied last, so ANSI escapes never count towards a column's width.
//!
//! Bookmarks follow the display settings: `layout-view = list` prints one line per
//! bookmark, `grid` prints cards in [`AppSettings::columns`] columns.

use chrono::{DateTime, Utc};
use colored::{Color, ColoredString, Colorize};
use shelf::access::AccessState;
use shelf::commands::helpers::category_names;
use shelf::commands::{CategoryCount, CmdMessage, MessageLevel};
use shelf::model::{AppState, Bookmark, BookmarkKind, CategoryColor};
use shelf::settings::{AppSettings, LayoutView, Setting};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
pub const ID_WIDTH: usize = 8;
pub const PIN_MARKER: &str = "⚲";
pub const FAVORITE_MARKER: &str = "★";
const COLUMN_GAP: usize = 2;

fn short_id(id: &str) -> String {
    id.chars().take(ID_WIDTH).collect()
}

fn category_color(color: CategoryColor) -> Color {
    match color {
        CategoryColor::Blue => Color::Blue,
        CategoryColor::Green => Color::Green,
        CategoryColor::Purple => Color::Magenta,
        CategoryColor::Pink => Color::BrightMagenta,
        CategoryColor::Teal => Color::Cyan,
        CategoryColor::Orange => Color::Yellow,
    }
}

fn stars(rating: u8) -> String {
    if rating == 0 {
        return String::new();
    }
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn markers(bookmark: &Bookmark) -> String {
    let pin = if bookmark.pinned { PIN_MARKER } else { " " };
    let fav = if bookmark.favorite { FAVORITE_MARKER } else { " " };
    format!("{}{}", pin, fav)
}

/// Renders the listed bookmarks in the layout the settings ask for.
pub fn render_bookmarks(bookmarks: &[Bookmark], state: &AppState) -> String {
    match state.settings.layout_view {
        LayoutView::List => render_bookmark_lines(bookmarks),
        LayoutView::Grid => render_bookmark_grid(bookmarks, state),
    }
}

/// One line per bookmark: markers, short id, name, url and age.
pub fn render_bookmark_lines(bookmarks: &[Bookmark]) -> String {
    let mut out = String::new();
    for bookmark in bookmarks {
        let id = format!("{:<width$} ", short_id(&bookmark.id), width = ID_WIDTH);
        let prefix = format!(" {} ", markers(bookmark));
        let time_ago = format_time_ago(bookmark.created_at);

        let fixed = prefix.width() + id.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&bookmark.name, available / 2);
        let url = truncate_to_width(
            &bookmark.url,
            available.saturating_sub(name.width() + COLUMN_GAP),
        );
        let padding = available.saturating_sub(name.width() + COLUMN_GAP + url.width());

        out.push_str(&format!(
            "{}{}{}{}{}{}{}\n",
            prefix.yellow(),
            id.dimmed(),
            name.bold(),
            " ".repeat(COLUMN_GAP),
            url.cyan(),
            " ".repeat(padding),
            time_ago.dimmed()
        ));
    }
    out
}

/// Card lines for one bookmark, each already truncated to `width` and styled.
fn card(bookmark: &Bookmark, state: &AppState, width: usize) -> Vec<(String, Option<Color>, bool)> {
    let settings = &state.settings;
    let mut lines = Vec::new();

    lines.push((
        fit(&format!("{} {}", markers(bookmark), bookmark.name), width),
        None,
        true,
    ));

    let mut meta = short_id(&bookmark.id);
    if bookmark.kind == BookmarkKind::App {
        meta.push_str(" [app]");
    }
    let rating = stars(bookmark.rating);
    if !rating.is_empty() {
        meta.push(' ');
        meta.push_str(&rating);
    }
    lines.push((fit(&meta, width), Some(Color::BrightBlack), false));
    lines.push((fit(&bookmark.url, width), Some(Color::Cyan), false));

    let first_color = bookmark
        .category_ids
        .first()
        .and_then(|id| state.category(id))
        .map(|c| category_color(c.color));
    lines.push((
        fit(&category_names(state, bookmark).join(", "), width),
        first_color,
        false,
    ));

    if settings.show_descriptions && !bookmark.description.is_empty() {
        lines.push((fit(&bookmark.description, width), None, false));
    }
    if settings.show_notes && !bookmark.notes.is_empty() {
        lines.push((
            fit(&format!("note: {}", bookmark.notes), width),
            Some(Color::BrightBlack),
            false,
        ));
    }
    lines
}

fn paint(text: &str, color: Option<Color>, bold: bool) -> ColoredString {
    let styled = match color {
        Some(color) => text.color(color),
        None => text.normal(),
    };
    if bold {
        styled.bold()
    } else {
        styled
    }
}

/// Bookmarks as cards, laid out row by row.
pub fn render_bookmark_grid(bookmarks: &[Bookmark], state: &AppState) -> String {
    let columns = state.settings.columns().max(1);
    let width = card_width(&state.settings);
    let mut out = String::new();

    for (row_index, row) in bookmarks.chunks(columns).enumerate() {
        if row_index > 0 {
            out.push('\n');
        }
        let cards: Vec<_> = row.iter().map(|b| card(b, state, width)).collect();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);

        for line in 0..height {
            let mut text = String::new();
            for (col, card) in cards.iter().enumerate() {
                if col > 0 {
                    text.push_str(&" ".repeat(COLUMN_GAP));
                }
                match card.get(line) {
                    Some((content, color, bold)) => {
                        text.push_str(&paint(content, *color, *bold).to_string())
                    }
                    None => text.push_str(&" ".repeat(width)),
                }
            }
            out.push_str(text.trim_end());
            out.push('\n');
        }
    }
    out
}

fn card_width(settings: &AppSettings) -> usize {
    let columns = settings.columns().max(1);
    (LINE_WIDTH - COLUMN_GAP * (columns - 1)) / columns
}

/// Truncates to `width` and pads with spaces to exactly `width` columns.
fn fit(text: &str, width: usize) -> String {
    let text = if text.width() > width {
        truncate_to_width(text, width)
    } else {
        text.to_string()
    };
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Every field of each bookmark, for `view`.
pub fn render_bookmark_details(bookmarks: &[Bookmark], state: &AppState) -> String {
    let mut out = String::new();
    for (i, bookmark) in bookmarks.iter().enumerate() {
        if i > 0 {
            out.push_str("\n--------------------------------\n\n");
        }
        out.push_str(&format!(
            "{} {}\n",
            bookmark.id.yellow(),
            bookmark.name.bold()
        ));
        let mut field = |label: &str, value: String| {
            out.push_str(&format!("  {:<12} {}\n", format!("{}:", label).dimmed(), value));
        };
        field("url", bookmark.url.cyan().to_string());
        field("categories", category_names(state, bookmark).join(", "));
        field("type", bookmark.kind.to_string());
        if let Some(link) = &bookmark.play_store_url {
            field("play store", link.clone());
        }
        field(
            "rating",
            if bookmark.rating == 0 {
                "unrated".to_string()
            } else {
                stars(bookmark.rating)
            },
        );
        let mut flags = Vec::new();
        if bookmark.pinned {
            flags.push("pinned");
        }
        if bookmark.favorite {
            flags.push("favorite");
        }
        if bookmark.private {
            flags.push("private");
        }
        if !flags.is_empty() {
            field("flags", flags.join(", "));
        }
        field(
            "added",
            format!(
                "{} ({})",
                bookmark.created_at.format("%Y-%m-%d %H:%M"),
                format_time_ago(bookmark.created_at).trim()
            ),
        );
        if !bookmark.description.is_empty() {
            field("description", bookmark.description.clone());
        }
        if !bookmark.notes.is_empty() {
            field("notes", bookmark.notes.clone());
        }
    }
    out
}

/// The category board: the view total, then each category with its count.
pub fn render_categories(entries: &[CategoryCount], total: Option<usize>) -> String {
    let mut out = String::new();
    if let Some(total) = total {
        out.push_str(&format!("{:<width$} {:<24} {:>5}\n", "", "All", total, width = ID_WIDTH));
    }
    for entry in entries {
        let name = fit(&entry.category.name, 24);
        out.push_str(&format!(
            "{:<width$} {} {:>5}\n",
            short_id(&entry.category.id).dimmed(),
            name.color(category_color(entry.category.color)),
            entry.count,
            width = ID_WIDTH
        ));
    }
    out
}

pub fn render_settings(settings: &[Setting]) -> String {
    settings.iter().map(|s| format!("{}\n", s)).collect()
}

pub fn render_access(state: AccessState) -> String {
    let text = match state {
        AccessState::NoPin => "Private Space: no PIN set".normal(),
        AccessState::Locked => "Private Space: locked".yellow(),
        AccessState::Unlocked => "Private Space: unlocked".green(),
    };
    format!("{}\n", text)
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let content = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
                MessageLevel::Error => message.content.red(),
            };
            format!("{}\n", content)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // Pad the unit to the width of "seconds" so the "ago" column lines up.
    let time_str = time_str
        .replace("hours ago", "  hours ago")
        .replace("hour ago", "   hour ago")
        .replace("days ago", "   days ago")
        .replace("day ago", "    day ago")
        .replace("weeks ago", "  weeks ago")
        .replace("week ago", "   week ago")
        .replace("months ago", " months ago")
        .replace("month ago", "  month ago")
        .replace("years ago", "  years ago")
        .replace("year ago", "   year ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
