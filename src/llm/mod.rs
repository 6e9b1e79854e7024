pub mod gateway;
pub mod gateways;
pub mod models;

pub use gateway::{GenerationConfig, ModelGateway};
pub use models::{Bitmap, PendingRequest};
