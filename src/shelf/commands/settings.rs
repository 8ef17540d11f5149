use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::AppState;
use crate::settings::{AppSettings, Setting};
use crate::store::DataStore;

/// Shows one setting, or all of them when `key` is `None`.
pub fn show(state: &AppState, key: Option<&str>) -> Result<CmdResult> {
    let settings = match key {
        Some(key) => vec![state.settings.get(key)?],
        None => state.settings.entries(),
    };
    Ok(CmdResult::default().with_settings(settings))
}

pub fn update<S: DataStore>(store: &mut S, state: &mut AppState, setting: Setting) -> Result<CmdResult> {
    let next = state.settings.update(setting.clone());
    store.save_settings(&next)?;
    state.settings = next;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Set {}", setting)));
    Ok(result.with_settings(vec![setting]))
}

pub fn reset<S: DataStore>(store: &mut S, state: &mut AppState) -> Result<CmdResult> {
    let next = AppSettings::reset();
    store.save_settings(&next)?;
    state.settings = next;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Settings reset to defaults"));
    Ok(result.with_settings(state.settings.entries()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{CardSize, LayoutView};
    use crate::store::kv_store::KvStore;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn update_persists_single_field() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = AppState::default();

        update(&mut store, &mut state, Setting::LayoutView(LayoutView::List)).unwrap();

        assert_eq!(state.settings.layout_view, LayoutView::List);
        assert_eq!(state.settings.card_size, CardSize::Medium);
        assert_eq!(store.load_settings().unwrap(), state.settings);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = AppState::default();
        update(&mut store, &mut state, Setting::HideLinksFromAll(true)).unwrap();

        let result = reset(&mut store, &mut state).unwrap();

        assert_eq!(state.settings, AppSettings::default());
        assert_eq!(result.messages[0].content, "Settings reset to defaults");
        assert_eq!(store.load_settings().unwrap(), AppSettings::default());
    }

    #[test]
    fn show_one_or_all() {
        let state = AppState::default();
        let one = show(&state, Some("cardSize")).unwrap();
        assert_eq!(one.settings, vec![Setting::CardSize(CardSize::Medium)]);

        let all = show(&state, None).unwrap();
        assert_eq!(all.settings.len(), 9);

        assert!(show(&state, Some("font")).is_err());
    }
}
