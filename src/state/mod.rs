//! Request lifecycle state
//!
//! - **RequestState**: the Idle/Loading/Success/Error variant and its transitions
//! - **StateStore**: current-value slot with replaying subscribers
//! - **RequestStateHolder**: submits prompts to a model gateway and publishes the outcome

pub mod holder;
pub mod request_state;
pub mod state_store;

pub use holder::RequestStateHolder;
pub use request_state::RequestState;
pub use state_store::{StateCallback, StateStore, StateStream, SubscriptionId};
