use std::fmt;

/// Lifecycle of the most recent prompt submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// No request has been submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The model answered with this text.
    Success(String),
    /// The model call failed with this message.
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Text carried by a completed request, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            RequestState::Success(text) | RequestState::Error(text) => Some(text),
            RequestState::Idle | RequestState::Loading => None,
        }
    }

    /// State after a submission starts; valid from every state.
    pub fn on_submit(&self) -> RequestState {
        RequestState::Loading
    }

    /// State after a call resolves.
    ///
    /// Completions are applied from any state, so a call superseded by a newer
    /// submission still overwrites whatever is current when it lands.
    pub fn on_complete<E: fmt::Display>(
        &self,
        outcome: std::result::Result<String, E>,
    ) -> RequestState {
        match outcome {
            Ok(text) => RequestState::Success(text),
            Err(err) => RequestState::Error(err.to_string()),
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestState::Idle => write!(f, "Idle"),
            RequestState::Loading => write!(f, "Loading"),
            RequestState::Success(text) => write!(f, "Success({})", text),
            RequestState::Error(message) => write!(f, "Error({})", message),
        }
    }
}
