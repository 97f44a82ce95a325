use quest_engine::{EngineContext, FrameClock, Game, GameConfig, InputEvent, InputQueue};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    clock: FrameClock,
    config: GameConfig,
    initialized: bool,
    /// Flat buffer of sound event IDs for shared-memory reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let ctx = EngineContext::with_config(&config);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            clock: FrameClock::new(),
            config,
            initialized: false,
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.clear_frame_data();
        self.game.init(&mut self.ctx);
        self.pack_sounds();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: advance the clock, update the game, pack outputs.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let dt_ms = self.clock.advance(dt);
        self.game.update(&mut self.ctx, &self.input, dt_ms);

        // Drain input after update
        self.input.drain();

        self.pack_sounds();
    }

    fn pack_sounds(&mut self) {
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }
    }

    /// The game being driven.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Serialized game snapshot for the presentation layer.
    pub fn snapshot_json(&self) -> String {
        self.game.snapshot().to_string()
    }

    /// Wall-clock milliseconds the runner has ticked through.
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn sound_events(&self) -> &[u8] {
        &self.sound_buffer
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_engine::{GameEvent, SoundEvent};
    use serde_json::{json, Value};

    #[derive(Default)]
    struct Echo {
        elapsed_ms: u64,
        commands: u32,
    }

    impl Game for Echo {
        fn init(&mut self, ctx: &mut EngineContext) {
            ctx.emit_sound(SoundEvent(6));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt_ms: u64) {
            self.elapsed_ms += dt_ms;
            for event in input.iter() {
                if let InputEvent::Custom { kind, .. } = event {
                    self.commands += 1;
                    ctx.emit_sound(SoundEvent(*kind));
                    ctx.emit_event(GameEvent::single(*kind as f32, 0.0));
                }
            }
        }

        fn snapshot(&self) -> Value {
            json!({ "elapsed": self.elapsed_ms, "commands": self.commands })
        }
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Echo::default());
        runner.tick(1.0);
        assert_eq!(runner.game().elapsed_ms, 0);
    }

    #[test]
    fn init_sounds_are_visible_before_first_tick() {
        let mut runner = GameRunner::new(Echo::default());
        runner.init();
        assert_eq!(runner.sound_events(), &[6]);
    }

    #[test]
    fn tick_converts_seconds_and_drains_input() {
        let mut runner = GameRunner::new(Echo::default());
        runner.init();
        runner.push_input(InputEvent::Custom { kind: 2, a: 0.0, b: 0.0, c: 0.0 });

        runner.tick(0.5);
        assert_eq!(runner.game().elapsed_ms, 500);
        assert_eq!(runner.sound_events(), &[2]);
        assert_eq!(runner.game_events_len(), 1);

        // Input was drained; the same command is not replayed.
        runner.tick(0.25);
        assert_eq!(runner.game().commands, 1);
        assert_eq!(runner.sound_events_len(), 0);
        assert_eq!(runner.elapsed_ms(), 750);
    }

    #[test]
    fn snapshot_serializes_game_view() {
        let mut runner = GameRunner::new(Echo::default());
        runner.init();
        runner.tick(0.125);
        let value: Value = serde_json::from_str(&runner.snapshot_json()).unwrap();
        assert_eq!(value["elapsed"], 125);
        assert_eq!(runner.max_sounds(), 32);
    }
}
