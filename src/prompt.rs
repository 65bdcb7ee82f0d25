// src/prompt.rs

use log::warn;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::config::MaskDefaults;
use crate::selection_logic::SelectionRect;

/// Blocking questions the selection overlay asks the user.
pub trait Prompt {
    /// Yes/No on the region just released. Returns `true` only for "Yes".
    fn confirm_selection(&self, rect: SelectionRect) -> bool;
    fn warn_unconfirmed(&self);
}

/// Native message boxes. `show()` blocks the druid event loop, which is what
/// keeps further input away from the overlay until the user answers.
pub struct DialogPrompt;

impl Prompt for DialogPrompt {
    fn confirm_selection(&self, rect: SelectionRect) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(MaskDefaults::CONFIRM_TITLE)
            .set_description(format!(
                "{}\n\n{}×{} at ({}, {})",
                MaskDefaults::CONFIRM_TEXT,
                rect.width,
                rect.height,
                rect.x,
                rect.y
            ))
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }

    fn warn_unconfirmed(&self) {
        warn!("Close refused: no confirmed region yet");
        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(MaskDefaults::WARNING_TITLE)
            .set_description(MaskDefaults::WARNING_TEXT)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
