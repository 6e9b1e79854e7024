//! Single-screen presentation model.
//!
//! [`Screen`] keeps the transient input (prompt text and selected photo) and renders a
//! [`RequestState`] into a [`View`]. It never decides success or failure itself; it
//! only forwards submissions to the [`RequestStateHolder`].

use super::image_decoder::ImageDecoder;
use super::picker::{ContentHandle, MediaFilter, MediaPicker};
use super::strings;
use crate::state::{RequestState, RequestStateHolder};
use std::fmt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const DIVIDER: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Error,
}

/// What the result area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Progress,
    Result { text: String, style: TextStyle },
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Progress => write!(f, "{}", strings::LOADING),
            View::Result {
                text,
                style: TextStyle::Normal,
            } => write!(f, "{}", text),
            View::Result {
                text,
                style: TextStyle::Error,
            } => write!(f, "{}{}{}", RED, text, RESET),
        }
    }
}

/// Result of pressing the submit button
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Forwarded to the holder; the handle resolves once the result is published
    Submitted(JoinHandle<()>),
    /// The button is disabled while the prompt is empty
    PromptEmpty,
    NoImage,
    /// The selected photo could not be decoded; nothing was sent
    ImageUnavailable(String),
}

/// Local state of the screen
#[derive(Debug, Clone)]
pub struct Screen {
    prompt: String,
    selected: Option<ContentHandle>,
    result_text: String,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            prompt: strings::PROMPT_PLACEHOLDER.to_string(),
            selected: None,
            result_text: strings::RESULTS_PLACEHOLDER.to_string(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    pub fn selected(&self) -> Option<&ContentHandle> {
        self.selected.as_ref()
    }

    /// Ask `picker` for a photo; a cancelled pick keeps the current one
    pub fn pick_photo(&mut self, picker: &dyn MediaPicker, selection: &str) -> bool {
        self.on_picker_result(picker.pick(selection, &MediaFilter::images()))
    }

    /// Apply a picker result; returns whether the selection changed
    pub fn on_picker_result(&mut self, result: Option<ContentHandle>) -> bool {
        match result {
            Some(handle) => {
                self.selected = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        !self.prompt.is_empty()
    }

    /// Decode the selected photo and forward it with the prompt to the holder
    pub fn press_go(
        &self,
        holder: &RequestStateHolder,
        decoder: &dyn ImageDecoder,
    ) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::PromptEmpty;
        }

        let Some(handle) = &self.selected else {
            debug!("Submit pressed without a photo");
            return SubmitOutcome::NoImage;
        };

        match decoder.decode(handle) {
            Ok(bitmap) => SubmitOutcome::Submitted(holder.submit(bitmap, self.prompt.clone())),
            Err(err) => {
                warn!(uri = %handle.uri(), error = %err, "Selected photo could not be decoded");
                SubmitOutcome::ImageUnavailable(err.to_string())
            }
        }
    }

    /// Render `state` into the result area
    ///
    /// Success and Error replace the remembered text; Idle and Loading keep it so the
    /// last answer reappears after a progress indicator.
    pub fn render(&mut self, state: &RequestState) -> View {
        match state {
            RequestState::Loading => View::Progress,
            RequestState::Success(text) => {
                self.result_text = text.clone();
                View::Result {
                    text: self.result_text.clone(),
                    style: TextStyle::Normal,
                }
            }
            RequestState::Error(message) => {
                self.result_text = message.clone();
                View::Result {
                    text: self.result_text.clone(),
                    style: TextStyle::Error,
                }
            }
            RequestState::Idle => View::Result {
                text: self.result_text.clone(),
                style: TextStyle::Normal,
            },
        }
    }

    /// Full text frame for a terminal
    pub fn draw(&mut self, state: &RequestState) -> String {
        let photo = match &self.selected {
            Some(handle) => format!("[photo] {}", handle.path().display()),
            None => strings::NO_PHOTO_SELECTED.to_string(),
        };
        let go = if self.can_submit() {
            format!("[{}]", strings::ACTION_GO)
        } else {
            format!("({} disabled)", strings::ACTION_GO)
        };
        let view = self.render(state);

        format!(
            "{title}\n{photo}\n{divider}\n[+ {pick}]\n{ask}\n{label}: {prompt}  {go}\n{divider}\n{view}\n",
            title = strings::APP_TITLE,
            photo = photo,
            divider = DIVIDER,
            pick = strings::ACTION_PICK_PHOTO,
            ask = strings::ASK_ABOUT_YOUR_PHOTO,
            label = strings::LABEL_PROMPT,
            prompt = self.prompt,
            go = go,
            view = view,
        )
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
