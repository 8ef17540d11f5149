//! Boundary checks run by the API before a value reaches the engine.
//!
//! The engine trusts its inputs: a bookmark with an empty name or a PIN with letters
//! in it would be stored as-is. These functions are where such input is rejected.
//!
//! PIN rules:
//! - Exactly 4 to 6 characters
//! - ASCII digits only
//! - On setup and change the PIN must be entered twice, identically

use crate::error::{Result, ShelfError};
use crate::model::{AppState, BookmarkDraft};

pub const MIN_PIN_LEN: usize = 4;
pub const MAX_PIN_LEN: usize = 6;
pub const MAX_RATING: u8 = 5;

/// Validates the format of a Private Space PIN.
///
/// # Examples
/// ```
/// use shelf::validation::validate_pin;
///
/// assert!(validate_pin("1234").is_ok());
/// assert!(validate_pin("123456").is_ok());
///
/// assert!(validate_pin("123").is_err());
/// assert!(validate_pin("1234567").is_err());
/// assert!(validate_pin("12a4").is_err());
/// ```
pub fn validate_pin(pin: &str) -> std::result::Result<(), PinValidationError> {
    let len = pin.chars().count();
    if !(MIN_PIN_LEN..=MAX_PIN_LEN).contains(&len) || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(PinValidationError::Format);
    }
    Ok(())
}

/// Validates a new PIN and its confirmation entry.
pub fn confirm_pin(pin: &str, confirmation: &str) -> std::result::Result<(), PinValidationError> {
    validate_pin(pin)?;
    if pin != confirmation {
        return Err(PinValidationError::Mismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinValidationError {
    /// Not 4-6 ASCII digits
    Format,
    /// PIN and confirmation differ
    Mismatch,
}

impl std::fmt::Display for PinValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinValidationError::Format => write!(f, "PIN must be 4-6 digits"),
            PinValidationError::Mismatch => write!(f, "PINs don't match"),
        }
    }
}

impl std::error::Error for PinValidationError {}

/// Trims and checks a draft against the current categories.
///
/// Returns the cleaned draft: name and url trimmed, duplicate category ids removed
/// (first occurrence wins), blank optional text normalized.
pub fn validate_draft(state: &AppState, mut draft: BookmarkDraft) -> Result<BookmarkDraft> {
    draft.name = draft.name.trim().to_string();
    draft.url = draft.url.trim().to_string();

    if draft.name.is_empty() {
        return Err(ShelfError::Validation("name cannot be empty".into()));
    }
    if draft.url.is_empty() {
        return Err(ShelfError::Validation("url cannot be empty".into()));
    }
    if draft.rating > MAX_RATING {
        return Err(ShelfError::Validation(format!(
            "rating must be between 0 and {}, got {}",
            MAX_RATING, draft.rating
        )));
    }

    let mut seen = Vec::with_capacity(draft.category_ids.len());
    for id in draft.category_ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    draft.category_ids = seen;

    if draft.category_ids.is_empty() {
        return Err(ShelfError::Validation(
            "select at least one category".into(),
        ));
    }
    if let Some(missing) = draft
        .category_ids
        .iter()
        .find(|id| state.category(id).is_none())
    {
        return Err(ShelfError::CategoryNotFound(missing.clone()));
    }

    draft.play_store_url = draft
        .play_store_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    Ok(draft)
}

/// Category names only need to be non-blank.
pub fn validate_category_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ShelfError::Validation("category name cannot be empty".into()));
    }
    Ok(name.to_string())
}
