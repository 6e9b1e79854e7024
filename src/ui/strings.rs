//! User-facing text shown by the screen.

pub const APP_TITLE: &str = "AI Viewer";
pub const ASK_ABOUT_YOUR_PHOTO: &str = "Ask Gemini about your photo";
pub const LABEL_PROMPT: &str = "Prompt";
pub const PROMPT_PLACEHOLDER: &str = "Provide a description of this photo";
pub const RESULTS_PLACEHOLDER: &str = "(Results will appear here)";
pub const ACTION_PICK_PHOTO: &str = "pick photo";
pub const ACTION_GO: &str = "Go";
pub const NO_PHOTO_SELECTED: &str = "No photo selected";
pub const LOADING: &str = "Thinking...";

pub const HELP: &str = "\
Commands:
  /pick <path>     choose a photo (empty path cancels)
  /prompt <text>   set the prompt (any line without a leading / does the same)
  /go              send the photo and prompt
  /show            redraw the screen
  /help            show this help
  /quit            exit";
