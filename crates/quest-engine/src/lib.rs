pub mod api;
pub mod core;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{SoundEvent, GameEvent};
pub use crate::core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};

// Extensions: optional systems a game owns
pub use extensions::{Scheduler, TimerId};
