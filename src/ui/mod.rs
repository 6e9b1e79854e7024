//! Presentation glue for the single screen: photo picking, image decoding,
//! user-facing strings, and the screen model that renders request state.

pub mod image_decoder;
pub mod picker;
pub mod screen;
pub mod strings;

pub use image_decoder::{FileImageDecoder, ImageDecoder};
pub use picker::{ContentHandle, MediaFilter, MediaPicker, PathPicker};
pub use screen::{Screen, SubmitOutcome, TextStyle, View};
