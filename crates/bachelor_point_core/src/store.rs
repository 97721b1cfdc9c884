//! crates/bachelor_point_core/src/store.rs
//!
//! The single owner of process-wide UI state: the active language and whether the
//! sign-in modal is showing. Every flow receives a clone of the same store.

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UiState {
    pub language: Language,
    pub sign_in_modal_open: bool,
}

/// A cheaply cloneable handle; all clones observe and mutate the same state.
#[derive(Debug, Clone)]
pub struct UiStore {
    sender: watch::Sender<UiState>,
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl UiStore {
    pub fn new(language: Language) -> Self {
        let (sender, _) = watch::channel(UiState {
            language,
            sign_in_modal_open: false,
        });
        Self { sender }
    }

    pub fn state(&self) -> UiState {
        *self.sender.borrow()
    }

    pub fn language(&self) -> Language {
        self.sender.borrow().language
    }

    /// Receives every change, for views that re-render on update.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.sender.subscribe()
    }

    pub fn open_sign_in_modal(&self) {
        self.update(|state| state.sign_in_modal_open = true);
    }

    pub fn close_sign_in_modal(&self) {
        self.update(|state| state.sign_in_modal_open = false);
    }

    pub fn toggle_language(&self) {
        self.update(|state| state.language = state.language.toggled());
    }

    pub fn set_language(&self, language: Language) {
        self.update(|state| state.language = language);
    }

    fn update(&self, apply: impl FnOnce(&mut UiState)) {
        self.sender.send_if_modified(|state| {
            let before = *state;
            apply(state);
            let changed = before != *state;
            if changed {
                debug!(?before, after = ?*state, "UI state changed");
            }
            changed
        });
    }
}
