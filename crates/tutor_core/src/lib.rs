pub mod error;
pub mod request;
pub mod turn;

pub use error::{CoreError, Result};
pub use request::GenerationRequest;
pub use turn::{ConversationTurn, Role, Transcript};
