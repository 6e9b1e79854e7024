pub mod error;
pub mod llm;
pub mod state;
pub mod ui;

pub use error::{Result, ViewerError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Result, ViewerError};
    pub use crate::llm::gateways::{GeminiConfig, GeminiGateway};
    pub use crate::llm::{Bitmap, GenerationConfig, ModelGateway};
    pub use crate::state::{RequestState, RequestStateHolder, StateStream};
    pub use crate::ui::{
        ContentHandle, FileImageDecoder, ImageDecoder, MediaFilter, MediaPicker, PathPicker,
        Screen, SubmitOutcome, View,
    };
}
