pub mod word;
pub mod game;
pub mod messages;
pub mod errors;

// Re-export all types
pub use word::*;
pub use game::*;
pub use messages::*;
pub use errors::*;

pub type SessionId = uuid::Uuid;
