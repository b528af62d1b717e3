//! Input handling for the TUI application.
//!
//! This module provides key-to-message mapping for translating terminal key
//! events into application messages.

use super::messages::AppMsg;
use crate::catalog::DatasetKey;

/// Maps a key event to an application message.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
pub fn map_key_to_message(key: &bubbletea_rs::event::KeyMsg) -> Option<AppMsg> {
    use crossterm::event::KeyCode;

    match key.key {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('1') => Some(AppMsg::SelectDataset(DatasetKey::Daily)),
        KeyCode::Char('2') => Some(AppMsg::SelectDataset(DatasetKey::NowPlaying)),
        KeyCode::Char('3') => Some(AppMsg::SelectDataset(DatasetKey::Upcoming)),
        KeyCode::Char('l') | KeyCode::Right => Some(AppMsg::NextWindow),
        KeyCode::Char('h') | KeyCode::Left => Some(AppMsg::PreviousWindow),
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::ScrollUp),
        KeyCode::Char('s') => Some(AppMsg::ShowSlides),
        KeyCode::Char('L') => Some(AppMsg::ShowList),
        KeyCode::Char('v') | KeyCode::Tab => Some(AppMsg::ToggleViewMode),
        KeyCode::Char('m') | KeyCode::Enter => Some(AppMsg::LoadMore),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        _ => None,
    }
}
