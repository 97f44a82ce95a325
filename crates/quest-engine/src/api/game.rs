use serde_json::Value;

use crate::api::types::{GameEvent, SoundEvent};
use crate::input::queue::InputQueue;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and announce it to the presentation layer.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. `dt_ms` is the wall-clock time elapsed since the
    /// previous tick, in whole milliseconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt_ms: u64);

    /// Read-only view of the game state for the presentation layer.
    fn snapshot(&self) -> Value {
        Value::Null
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    max_sounds: usize,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create an EngineContext sized for the given config.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            max_sounds: config.max_sounds,
            max_events: config.max_events,
        }
    }

    /// Emit a sound event to be forwarded to TypeScript.
    /// Fire-and-forget: cues past the per-frame capacity are dropped.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        if self.sounds.len() >= self.max_sounds {
            log::warn!("sound buffer full, dropping cue {}", event.0);
            return;
        }
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full, dropping event kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_and_clear() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent(3));
        ctx.emit_event(GameEvent::single(1.0, 2.0));
        assert_eq!(ctx.sounds, vec![SoundEvent(3)]);
        assert_eq!(ctx.events.len(), 1);

        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn overflow_is_dropped_silently() {
        let config = GameConfig { max_sounds: 2, max_events: 1 };
        let mut ctx = EngineContext::with_config(&config);
        for i in 0..5 {
            ctx.emit_sound(SoundEvent(i));
            ctx.emit_event(GameEvent::single(i as f32, 0.0));
        }
        assert_eq!(ctx.sounds, vec![SoundEvent(0), SoundEvent(1)]);
        assert_eq!(ctx.events.len(), 1);
    }

    struct Counter {
        ticks: u32,
        elapsed: u64,
    }

    impl Game for Counter {
        fn init(&mut self, _ctx: &mut EngineContext) {}

        fn update(&mut self, _ctx: &mut EngineContext, _input: &InputQueue, dt_ms: u64) {
            self.ticks += 1;
            self.elapsed += dt_ms;
        }
    }

    #[test]
    fn default_snapshot_is_null() {
        let mut game = Counter { ticks: 0, elapsed: 0 };
        let mut ctx = EngineContext::new();
        game.update(&mut ctx, &InputQueue::new(), 16);
        assert_eq!(game.ticks, 1);
        assert_eq!(game.elapsed, 16);
        assert_eq!(game.snapshot(), Value::Null);
        assert_eq!(game.config().max_sounds, 32);
    }
}
