//! Private Space commands.
//!
//! PIN format is checked here, before the access state machine sees the value. A
//! well-formed but wrong PIN is not an error: the result carries `accepted: false`.

use crate::commands::helpers::require_unlocked;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{AppState, Bookmark};
use crate::store::DataStore;
use crate::validation::{confirm_pin, validate_pin};
use tracing::{info, warn};

fn outcome(state: &AppState, accepted: bool) -> CmdResult {
    CmdResult {
        access: Some(state.private_space.state()),
        accepted: Some(accepted),
        ..Default::default()
    }
}

pub fn status(state: &AppState) -> Result<CmdResult> {
    Ok(CmdResult {
        access: Some(state.private_space.state()),
        ..Default::default()
    })
}

/// Creates the first PIN and unlocks. Refused when a PIN already exists.
pub fn setup<S: DataStore>(
    store: &mut S,
    state: &mut AppState,
    pin: &str,
    confirmation: &str,
) -> Result<CmdResult> {
    confirm_pin(pin, confirmation)?;

    let mut next = state.private_space.clone();
    if !next.set_pin(pin) {
        let mut result = outcome(state, false);
        result.add_message(CmdMessage::error(
            "A PIN already exists, change it instead",
        ));
        return Ok(result);
    }
    store.save_pin(next.stored_pin())?;
    state.private_space = next;
    info!("private space PIN created");

    let mut result = outcome(state, true);
    result.add_message(CmdMessage::success("PIN created successfully"));
    Ok(result)
}

pub fn unlock(state: &mut AppState, pin: &str) -> Result<CmdResult> {
    validate_pin(pin)?;

    let accepted = state.private_space.unlock(pin);
    let mut result = outcome(state, accepted);
    if accepted {
        result.add_message(CmdMessage::success("Private Space unlocked"));
    } else {
        warn!("private space unlock rejected");
        let message = if state.private_space.has_pin() {
            "Incorrect PIN"
        } else {
            "No PIN set, create one first"
        };
        result.add_message(CmdMessage::error(message));
    }
    Ok(result)
}

pub fn lock(state: &mut AppState) -> Result<CmdResult> {
    state.private_space.lock();
    let mut result = outcome(state, true);
    result.add_message(CmdMessage::success("Private Space locked"));
    Ok(result)
}

/// Replaces the PIN when `old_pin` is correct. Lock state is left alone.
pub fn change<S: DataStore>(
    store: &mut S,
    state: &mut AppState,
    old_pin: &str,
    new_pin: &str,
    confirmation: &str,
) -> Result<CmdResult> {
    validate_pin(old_pin)?;
    confirm_pin(new_pin, confirmation)?;

    let mut next = state.private_space.clone();
    if !next.change_pin(old_pin, new_pin) {
        warn!("private space PIN change rejected");
        let mut result = outcome(state, false);
        result.add_message(CmdMessage::error("Current PIN is incorrect"));
        return Ok(result);
    }
    store.save_pin(next.stored_pin())?;
    state.private_space = next;
    info!("private space PIN changed");

    let mut result = outcome(state, true);
    result.add_message(CmdMessage::success("PIN changed successfully"));
    Ok(result)
}

/// Deletes every private bookmark. Public bookmarks are kept.
pub fn clear<S: DataStore>(store: &mut S, state: &mut AppState) -> Result<CmdResult> {
    require_unlocked(state)?;

    let (removed, kept): (Vec<Bookmark>, Vec<Bookmark>) =
        state.bookmarks.iter().cloned().partition(|b| b.private);
    store.save_bookmarks(&kept)?;
    state.bookmarks = kept;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Private Space data cleared"));
    Ok(result.with_affected_bookmarks(removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessState;
    use crate::error::ShelfError;
    use crate::store::kv_store::KvStore;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::{state_with, BookmarkBuilder};
    use crate::validation::PinValidationError;

    fn store() -> KvStore<MemBackend> {
        KvStore::with_backend(MemBackend::new())
    }

    #[test]
    fn setup_stores_pin_and_unlocks() {
        let mut store = store();
        let mut state = AppState::default();

        let result = setup(&mut store, &mut state, "1234", "1234").unwrap();

        assert_eq!(result.accepted, Some(true));
        assert_eq!(result.access, Some(AccessState::Unlocked));
        assert_eq!(store.load_pin().unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn setup_validates_format_and_confirmation() {
        let mut store = store();
        let mut state = AppState::default();
        assert!(matches!(
            setup(&mut store, &mut state, "12", "12"),
            Err(ShelfError::InvalidPin(PinValidationError::Format))
        ));
        assert!(matches!(
            setup(&mut store, &mut state, "1234", "1235"),
            Err(ShelfError::InvalidPin(PinValidationError::Mismatch))
        ));
        assert_eq!(state.private_space.state(), AccessState::NoPin);
        assert_eq!(store.load_pin().unwrap(), None);
    }

    #[test]
    fn setup_refuses_existing_pin() {
        let mut store = store();
        let mut state = AppState::default();
        setup(&mut store, &mut state, "1234", "1234").unwrap();

        let result = setup(&mut store, &mut state, "9999", "9999").unwrap();

        assert_eq!(result.accepted, Some(false));
        assert_eq!(store.load_pin().unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn unlock_truth_table() {
        let mut state = AppState::default();
        let none = unlock(&mut state, "1234").unwrap();
        assert_eq!(none.accepted, Some(false));
        assert_eq!(none.access, Some(AccessState::NoPin));

        state.private_space.set_pin("1234");
        lock(&mut state).unwrap();

        let wrong = unlock(&mut state, "4321").unwrap();
        assert_eq!(wrong.accepted, Some(false));
        assert_eq!(wrong.messages[0].content, "Incorrect PIN");
        assert_eq!(state.private_space.state(), AccessState::Locked);

        let right = unlock(&mut state, "1234").unwrap();
        assert_eq!(right.accepted, Some(true));
        assert_eq!(state.private_space.state(), AccessState::Unlocked);
    }

    #[test]
    fn malformed_unlock_is_a_validation_error() {
        let mut state = AppState::default();
        state.private_space.set_pin("1234");
        state.private_space.lock();
        assert!(matches!(
            unlock(&mut state, "abcd"),
            Err(ShelfError::InvalidPin(_))
        ));
    }

    #[test]
    fn change_requires_current_pin() {
        let mut store = store();
        let mut state = AppState::default();
        setup(&mut store, &mut state, "1234", "1234").unwrap();
        lock(&mut state).unwrap();

        let wrong = change(&mut store, &mut state, "0000", "5678", "5678").unwrap();
        assert_eq!(wrong.accepted, Some(false));
        assert_eq!(store.load_pin().unwrap().as_deref(), Some("1234"));

        let ok = change(&mut store, &mut state, "1234", "5678", "5678").unwrap();
        assert_eq!(ok.accepted, Some(true));
        assert_eq!(ok.access, Some(AccessState::Locked));
        assert_eq!(store.load_pin().unwrap().as_deref(), Some("5678"));
    }

    #[test]
    fn clear_removes_only_private_bookmarks() {
        let mut store = store();
        let mut state = state_with(vec![
            BookmarkBuilder::new("public").build(),
            BookmarkBuilder::new("secret").private().build(),
        ]);
        assert!(matches!(
            clear(&mut store, &mut state),
            Err(ShelfError::PrivateSpaceLocked)
        ));

        state.private_space.set_pin("1234");
        let result = clear(&mut store, &mut state).unwrap();

        assert_eq!(result.affected_bookmarks.len(), 1);
        assert_eq!(state.bookmarks.len(), 1);
        assert_eq!(state.bookmarks[0].name, "public");
    }
}
