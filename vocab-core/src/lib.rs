pub mod answer_check;
pub mod game_events;
pub mod host;
pub mod keyboard;
pub mod lessons;
pub mod random;
pub mod sessions;
pub mod timers;
pub mod word_pool;

// Re-export main components
pub use answer_check::*;
pub use game_events::*;
pub use host::*;
pub use keyboard::*;
pub use lessons::*;
pub use random::*;
pub use sessions::*;
pub use timers::*;
pub use word_pool::*;
