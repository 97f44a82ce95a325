//! Bonding Quest game - thin controller layer.
//!
//! Routes UI commands to the session, drives the bonding animation from the
//! frame clock, and publishes state to the presentation layer.

use quest_engine::input::queue::{InputEvent, InputQueue};
use quest_engine::{EngineContext, Game, GameConfig, GameEvent};
use serde::Serialize;

use crate::animation::{BondingSequence, Phase, SequenceSignal};
use crate::audio::{AudioSettings, Cue};
use crate::chemistry::{BondRules, BondType};
use crate::config::{ConfigError, QuestConfig};
use crate::elements::{Category, Element, ElementCatalog};
use crate::locale::{Language, Translations};
use crate::session::{GameSession, Screen, Slot};

/// Custom event kinds from React UI.
pub mod events {
    pub const START: u32 = 1;
    pub const SELECT_FIRST: u32 = 2;   // a: atomic number
    pub const SELECT_SECOND: u32 = 3;  // a: atomic number
    pub const SELECT: u32 = 4;         // a: atomic number, fills the active slot
    pub const FOCUS_SLOT: u32 = 5;     // a: 0 = first, 1 = second
    pub const CONFIRM: u32 = 6;
    pub const PLAY_AGAIN: u32 = 7;
    pub const BACK_TO_MENU: u32 = 8;
    pub const SET_LANGUAGE: u32 = 9;   // a: 0 = en, 1 = id
    pub const TOGGLE_LANGUAGE: u32 = 10;
    pub const TOGGLE_SOUND: u32 = 11;
    pub const TOGGLE_MUSIC: u32 = 12;
}

/// Game event kinds to React.
pub mod game_events {
    pub const SCREEN: f32 = 1.0;  // a: screen code
    pub const PHASE: f32 = 2.0;   // a: phase code, b: bond type code
    pub const SCORE: f32 = 3.0;   // a: score, b: level
}

mod keys {
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
}

/// What the results screen shows. Computed when the animation finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondResult {
    pub bond_type: BondType,
    /// Localized bond label ("Ionic Bond", "Ikatan Ion", ...).
    pub bond_label: String,
    pub formula: String,
    pub name: String,
    pub description: String,
    pub atomic_number_a: u32,
    pub atomic_number_b: u32,
}

/// A `BondResult` with its elements resolved against the catalog.
#[derive(Serialize)]
struct ResultView<'a> {
    #[serde(flatten)]
    result: &'a BondResult,
    element_a: Option<&'a Element>,
    element_b: Option<&'a Element>,
}

/// One tile of the element picker, localized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementCard<'a> {
    pub atomic_number: u32,
    pub symbol: &'a str,
    pub name: &'a str,
    pub category: Category,
    /// Localized category legend ("Metals", "Logam", ...).
    pub legend: &'a str,
    pub color: &'a str,
}

/// One entry of the category legend, in filter-code order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry<'a> {
    pub code: u32,
    pub category: Category,
    pub label: &'a str,
}

/// Serialized view handed to the presentation layer.
#[derive(Serialize)]
struct Snapshot<'a> {
    screen: Screen,
    language: Language,
    score: u32,
    level: u32,
    selected_a: Option<&'a Element>,
    selected_b: Option<&'a Element>,
    active_slot: Slot,
    phase: Option<Phase>,
    bond_type: Option<BondType>,
    result: Option<ResultView<'a>>,
    audio: AudioSettings,
}

/// The Bonding Quest game.
pub struct BondingQuest {
    catalog: ElementCatalog,
    translations: Translations,
    config: QuestConfig,
    rules: BondRules,
    session: GameSession,
    /// Present only while the session is animating.
    sequence: Option<BondingSequence>,
    result: Option<BondResult>,
    language: Language,
    audio: AudioSettings,
}

impl BondingQuest {
    pub fn new() -> Self {
        Self::build(QuestConfig::default())
    }

    /// Build with custom rules. Rejects configs that fail validation.
    pub fn with_config(config: QuestConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Build from a JSON config document.
    pub fn from_config_json(json: &str) -> Result<Self, ConfigError> {
        QuestConfig::from_json(json).map(Self::build)
    }

    fn build(config: QuestConfig) -> Self {
        let catalog = ElementCatalog::load().expect("Failed to load element catalog");
        let translations = Translations::load().expect("Failed to load translations");

        Self {
            catalog,
            translations,
            rules: config.bond_rules(),
            session: GameSession::new(config.scoring()),
            sequence: None,
            result: None,
            language: config.default_language,
            audio: AudioSettings::default(),
            config,
        }
    }

    pub fn catalog(&self) -> &ElementCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn sequence(&self) -> Option<&BondingSequence> {
        self.sequence.as_ref()
    }

    pub fn result(&self) -> Option<&BondResult> {
        self.result.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn audio(&self) -> AudioSettings {
        self.audio
    }

    /// Picker tiles matching `term`, optionally limited to one category.
    pub fn element_cards(&self, term: &str, category: Option<Category>) -> Vec<ElementCard<'_>> {
        let localizer = self.translations.localizer(self.language);
        self.catalog
            .filter(term, category)
            .into_iter()
            .map(|e| ElementCard {
                atomic_number: e.atomic_number,
                symbol: &e.symbol,
                name: e.display_name(localizer.language()),
                category: e.category,
                legend: localizer.translate(e.category.legend_key()),
                color: &e.color,
            })
            .collect()
    }

    /// Category legend in the current language.
    pub fn legend(&self) -> Vec<LegendEntry<'_>> {
        let localizer = self.translations.localizer(self.language);
        Category::ALL
            .iter()
            .enumerate()
            .map(|(code, &category)| LegendEntry {
                code: code as u32,
                category,
                label: localizer.translate(category.legend_key()),
            })
            .collect()
    }

    /// `element_cards` as JSON for the picker.
    pub fn element_cards_json(&self, term: &str, category: Option<Category>) -> String {
        to_json_or(&self.element_cards(term, category), "[]")
    }

    /// `legend` as JSON.
    pub fn legend_json(&self) -> String {
        to_json_or(&self.legend(), "[]")
    }

    /// Translate a UI key in the current language.
    pub fn translate(&self, key: &str) -> String {
        self.translations.localizer(self.language).translate(key).to_string()
    }

    // ---- Commands ----

    pub fn start(&mut self, ctx: &mut EngineContext) {
        if self.session.start() {
            self.audio.play(ctx, Cue::Click);
            self.screen_changed(ctx);
        } else {
            log::debug!("start ignored on {:?}", self.session.screen());
        }
    }

    pub fn select_first(&mut self, ctx: &mut EngineContext, atomic_number: u32) {
        if !self.known(atomic_number) {
            return;
        }
        if self.session.select_first(atomic_number) {
            self.audio.play(ctx, Cue::Click);
        }
    }

    pub fn select_second(&mut self, ctx: &mut EngineContext, atomic_number: u32) {
        if !self.known(atomic_number) {
            return;
        }
        if self.session.select_second(atomic_number) {
            self.audio.play(ctx, Cue::Click);
        }
    }

    /// Fill the active slot.
    pub fn select(&mut self, ctx: &mut EngineContext, atomic_number: u32) {
        if !self.known(atomic_number) {
            return;
        }
        if self.session.select(atomic_number).is_some() {
            self.audio.play(ctx, Cue::Click);
        }
    }

    pub fn focus_slot(&mut self, slot: Slot) {
        self.session.focus_slot(slot);
    }

    /// Start bonding the selected pair. No-op unless both slots are filled.
    pub fn confirm(&mut self, ctx: &mut EngineContext) {
        let Some((a, b)) = self.selected_elements() else {
            log::debug!("confirm ignored: selection incomplete");
            return;
        };
        let bond_type = self.rules.classify(a, b);
        if !self.session.confirm() {
            log::debug!("confirm ignored on {:?}", self.session.screen());
            return;
        }

        // Replacing the old run drops its timers.
        let sequence = BondingSequence::start(bond_type, self.config.timings());
        self.sequence = Some(sequence);
        self.result = None;

        self.audio.play(ctx, Cue::Click);
        self.audio.play(ctx, Cue::bonding(bond_type));
        self.screen_changed(ctx);
        self.phase_changed(ctx, Phase::Approaching, bond_type);
    }

    pub fn play_again(&mut self, ctx: &mut EngineContext) {
        if self.session.play_again() {
            self.result = None;
            self.audio.play(ctx, Cue::Click);
            self.screen_changed(ctx);
        }
    }

    pub fn back_to_menu(&mut self, ctx: &mut EngineContext) {
        if self.session.back_to_menu() {
            self.result = None;
            self.audio.play(ctx, Cue::Click);
            self.screen_changed(ctx);
        }
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language == language {
            return;
        }
        log::info!("language: {:?}", language);
        self.language = language;
        if self.result.is_some() {
            self.result = self.compute_result();
        }
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.language.toggled());
    }

    pub fn toggle_sound(&mut self) {
        self.audio.toggle_sound();
    }

    pub fn toggle_music(&mut self, ctx: &mut EngineContext) {
        self.audio.toggle_music(ctx);
    }

    // ---- Internals ----

    fn known(&self, atomic_number: u32) -> bool {
        let known = self.catalog.get(atomic_number).is_some();
        if !known {
            log::debug!("unknown atomic number {}", atomic_number);
        }
        known
    }

    fn selected_elements(&self) -> Option<(&Element, &Element)> {
        let (a, b) = self.session.pair()?;
        Some((self.catalog.get(a)?, self.catalog.get(b)?))
    }

    fn compute_result(&self) -> Option<BondResult> {
        let (a, b) = self.selected_elements()?;
        let localizer = self.translations.localizer(self.language);
        let compound = self.rules.compound(a, b, localizer.language());
        Some(BondResult {
            bond_type: compound.bond_type,
            bond_label: localizer.translate(compound.bond_type.label_key()).to_string(),
            formula: compound.formula,
            name: compound.name,
            description: compound.description.to_string(),
            atomic_number_a: a.atomic_number,
            atomic_number_b: b.atomic_number,
        })
    }

    fn advance_animation(&mut self, ctx: &mut EngineContext, dt_ms: u64) {
        let signals = match self.sequence.as_mut() {
            Some(sequence) => sequence.advance(dt_ms),
            None => return,
        };

        for signal in signals {
            match signal {
                SequenceSignal::PhaseChanged(phase) => {
                    if let Some(bond_type) = self.sequence.as_ref().map(|s| s.bond_type()) {
                        log::debug!("phase: {:?}", phase);
                        self.phase_changed(ctx, phase, bond_type);
                    }
                }
                SequenceSignal::Finished => self.finish_animation(ctx),
            }
        }
    }

    fn finish_animation(&mut self, ctx: &mut EngineContext) {
        self.sequence = None;
        if !self.session.complete() {
            return;
        }
        self.result = self.compute_result();
        self.audio.play(ctx, Cue::Success);
        self.screen_changed(ctx);
        ctx.emit_event(GameEvent {
            kind: game_events::SCORE,
            a: self.session.score() as f32,
            b: self.session.level() as f32,
            c: 0.0,
        });
    }

    fn screen_changed(&self, ctx: &mut EngineContext) {
        let screen = self.session.screen();
        log::info!("screen: {:?}", screen);
        ctx.emit_event(GameEvent::single(game_events::SCREEN, screen.code() as f32));
    }

    fn phase_changed(&self, ctx: &mut EngineContext, phase: Phase, bond_type: BondType) {
        ctx.emit_event(GameEvent {
            kind: game_events::PHASE,
            a: phase.code() as f32,
            b: bond_type.code() as f32,
            c: 0.0,
        });
    }

    /// Handle custom events from React UI.
    fn handle_custom_event(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) {
        match kind {
            events::START => self.start(ctx),
            events::SELECT_FIRST => self.select_first(ctx, a as u32),
            events::SELECT_SECOND => self.select_second(ctx, a as u32),
            events::SELECT => self.select(ctx, a as u32),
            events::FOCUS_SLOT => {
                let slot = if a as u32 == 1 { Slot::Second } else { Slot::First };
                self.focus_slot(slot);
            }
            events::CONFIRM => self.confirm(ctx),
            events::PLAY_AGAIN => self.play_again(ctx),
            events::BACK_TO_MENU => self.back_to_menu(ctx),
            events::SET_LANGUAGE => match Language::from_code(a as u32) {
                Some(language) => self.set_language(language),
                None => log::debug!("unknown language code {}", a),
            },
            events::TOGGLE_LANGUAGE => self.toggle_language(),
            events::TOGGLE_SOUND => self.toggle_sound(),
            events::TOGGLE_MUSIC => self.toggle_music(ctx),
            _ => log::debug!("unknown custom event {}", kind),
        }
    }

    fn handle_key(&mut self, ctx: &mut EngineContext, key_code: u32) {
        match (key_code, self.session.screen()) {
            (keys::ENTER, Screen::Menu) => self.start(ctx),
            (keys::ENTER, Screen::Selecting) => self.confirm(ctx),
            (keys::ENTER, Screen::Results) => self.play_again(ctx),
            (keys::ESCAPE, _) => self.back_to_menu(ctx),
            _ => {}
        }
    }
}

impl Game for BondingQuest {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_sounds: 16,
            max_events: 16,
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!(
            "{} elements loaded, language {:?}",
            self.catalog.len(),
            self.language
        );
        self.audio.play(ctx, Cue::MusicStart);
        self.screen_changed(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt_ms: u64) {
        // Timers first, so a run started by this frame's input begins at zero.
        self.advance_animation(ctx, dt_ms);

        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, .. } => self.handle_custom_event(ctx, kind, a),
                InputEvent::KeyDown { key_code } => self.handle_key(ctx, key_code),
            }
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        let snapshot = Snapshot {
            screen: self.session.screen(),
            language: self.language,
            score: self.session.score(),
            level: self.session.level(),
            selected_a: self.session.selected_a().and_then(|n| self.catalog.get(n)),
            selected_b: self.session.selected_b().and_then(|n| self.catalog.get(n)),
            active_slot: self.session.active_slot(),
            phase: self.sequence.as_ref().map(|s| s.phase()),
            bond_type: self.sequence.as_ref().map(|s| s.bond_type()),
            result: self.result.as_ref().map(|result| ResultView {
                result,
                element_a: self.catalog.get(result.atomic_number_a),
                element_b: self.catalog.get(result.atomic_number_b),
            }),
            audio: self.audio,
        };
        serde_json::to_value(snapshot).unwrap_or_else(|err| {
            log::warn!("snapshot serialization failed: {}", err);
            serde_json::Value::Null
        })
    }
}

fn to_json_or<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::warn!("serialization failed: {}", err);
        fallback.to_string()
    })
}

impl Default for BondingQuest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_engine::SoundEvent;

    const H: u32 = 1;
    const O: u32 = 8;
    const NA: u32 = 11;
    const CL: u32 = 17;
    const K: u32 = 19;

    fn custom(kind: u32, a: f32) -> InputEvent {
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }

    /// Run one frame with the given input.
    fn frame(game: &mut BondingQuest, ctx: &mut EngineContext, inputs: &[InputEvent], dt_ms: u64) {
        ctx.clear_frame_data();
        let mut queue = InputQueue::new();
        for event in inputs {
            queue.push(*event);
        }
        game.update(ctx, &queue, dt_ms);
    }

    fn started() -> (BondingQuest, EngineContext) {
        let mut game = BondingQuest::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        frame(&mut game, &mut ctx, &[custom(events::START, 0.0)], 16);
        (game, ctx)
    }

    fn bond(game: &mut BondingQuest, ctx: &mut EngineContext, a: u32, b: u32) {
        frame(
            game,
            ctx,
            &[
                custom(events::SELECT_FIRST, a as f32),
                custom(events::SELECT_SECOND, b as f32),
                custom(events::CONFIRM, 0.0),
            ],
            16,
        );
    }

    fn screen_events(ctx: &EngineContext) -> Vec<f32> {
        ctx.events
            .iter()
            .filter(|e| e.kind == game_events::SCREEN)
            .map(|e| e.a)
            .collect()
    }

    #[test]
    fn init_starts_music_on_menu() {
        let mut game = BondingQuest::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        assert_eq!(ctx.sounds, vec![SoundEvent::from(Cue::MusicStart)]);
        assert_eq!(screen_events(&ctx), vec![Screen::Menu.code() as f32]);
        assert_eq!(game.session().screen(), Screen::Menu);
    }

    #[test]
    fn full_round_sodium_chloride() {
        let (mut game, mut ctx) = started();
        bond(&mut game, &mut ctx, NA, CL);
        assert_eq!(game.session().screen(), Screen::Animating);
        assert!(ctx.sounds.contains(&SoundEvent::from(Cue::IonicBonding)));

        let sequence = game.sequence().unwrap();
        assert_eq!(sequence.phase(), Phase::Approaching);
        assert_eq!(sequence.bond_type(), BondType::Ionic);

        frame(&mut game, &mut ctx, &[], 2000);
        assert_eq!(game.sequence().unwrap().phase(), Phase::Bonding);
        frame(&mut game, &mut ctx, &[], 2000);
        assert_eq!(game.sequence().unwrap().phase(), Phase::Complete);
        frame(&mut game, &mut ctx, &[], 1499);
        assert_eq!(game.session().screen(), Screen::Animating);

        frame(&mut game, &mut ctx, &[], 1);
        assert_eq!(game.session().screen(), Screen::Results);
        assert!(game.sequence().is_none());
        assert_eq!(game.session().score(), 100);
        assert_eq!(game.session().level(), 1);
        assert_eq!(ctx.sounds, vec![SoundEvent::from(Cue::Success)]);

        let result = game.result().unwrap();
        assert_eq!(result.formula, "NaCl");
        assert_eq!(result.name, "Sodium Chloride");
        assert_eq!(result.bond_label, "Ionic Bond");
        assert_eq!((result.atomic_number_a, result.atomic_number_b), (NA, CL));
        let snap = game.snapshot();
        assert_eq!(snap["result"]["formula"], "NaCl");
        assert_eq!(snap["result"]["element_a"]["symbol"], "Na");
        assert_eq!(snap["result"]["element_b"]["name_id"], "Klorin");
    }

    #[test]
    fn confirm_with_one_element_is_ignored() {
        let (mut game, mut ctx) = started();
        frame(
            &mut game,
            &mut ctx,
            &[custom(events::SELECT_FIRST, NA as f32), custom(events::CONFIRM, 0.0)],
            16,
        );
        assert_eq!(game.session().screen(), Screen::Selecting);
        assert!(game.sequence().is_none());
    }

    #[test]
    fn unknown_element_is_rejected() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, &[custom(events::SELECT_FIRST, 99.0)], 16);
        assert_eq!(game.session().selected_a(), None);
    }

    #[test]
    fn five_bonds_reach_level_two() {
        let (mut game, mut ctx) = started();
        for _ in 0..5 {
            bond(&mut game, &mut ctx, H, O);
            frame(&mut game, &mut ctx, &[], 5500);
            assert_eq!(game.session().screen(), Screen::Results);
            frame(&mut game, &mut ctx, &[custom(events::PLAY_AGAIN, 0.0)], 16);
        }
        assert_eq!(game.session().score(), 500);
        assert_eq!(game.session().level(), 2);
    }

    #[test]
    fn replay_does_not_inherit_old_timers() {
        let (mut game, mut ctx) = started();
        bond(&mut game, &mut ctx, NA, CL);
        frame(&mut game, &mut ctx, &[], 5500);
        frame(&mut game, &mut ctx, &[custom(events::PLAY_AGAIN, 0.0)], 16);
        assert_eq!(game.result(), None);

        bond(&mut game, &mut ctx, NA, K);
        assert_eq!(game.sequence().unwrap().elapsed_ms(), 0);
        assert_eq!(game.sequence().unwrap().bond_type(), BondType::Metallic);

        frame(&mut game, &mut ctx, &[], 5499);
        assert_eq!(game.session().screen(), Screen::Animating);
        assert_eq!(game.session().score(), 100);

        frame(&mut game, &mut ctx, &[], 1);
        assert_eq!(game.session().screen(), Screen::Results);
        assert_eq!(game.session().score(), 200);
    }

    #[test]
    fn long_frame_finishes_in_order() {
        let (mut game, mut ctx) = started();
        bond(&mut game, &mut ctx, NA, CL);
        frame(&mut game, &mut ctx, &[], 10_000);

        let kinds: Vec<f32> = ctx.events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![game_events::PHASE, game_events::PHASE, game_events::SCREEN, game_events::SCORE]
        );
        let score = ctx.events.last().unwrap();
        assert_eq!((score.a, score.b), (100.0, 1.0));
    }

    #[test]
    fn animation_ignores_navigation() {
        let (mut game, mut ctx) = started();
        bond(&mut game, &mut ctx, NA, CL);
        frame(
            &mut game,
            &mut ctx,
            &[custom(events::BACK_TO_MENU, 0.0), InputEvent::KeyDown { key_code: 27 }],
            100,
        );
        assert_eq!(game.session().screen(), Screen::Animating);
        assert!(game.sequence().is_some());
    }

    #[test]
    fn keyboard_drives_screens() {
        let mut game = BondingQuest::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);

        frame(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: 13 }], 16);
        assert_eq!(game.session().screen(), Screen::Selecting);
        frame(
            &mut game,
            &mut ctx,
            &[custom(events::SELECT, NA as f32), custom(events::SELECT, CL as f32)],
            16,
        );
        frame(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: 13 }], 16);
        assert_eq!(game.session().screen(), Screen::Animating);
        frame(&mut game, &mut ctx, &[], 6000);
        frame(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: 27 }], 16);
        assert_eq!(game.session().screen(), Screen::Menu);
        assert_eq!(game.session().score(), 100);
    }

    #[test]
    fn language_switch_relocalizes_result() {
        let (mut game, mut ctx) = started();
        bond(&mut game, &mut ctx, NA, CL);
        frame(&mut game, &mut ctx, &[], 5500);
        assert_eq!(game.result().unwrap().name, "Sodium Chloride");

        frame(&mut game, &mut ctx, &[custom(events::TOGGLE_LANGUAGE, 0.0)], 16);
        let result = game.result().unwrap();
        assert_eq!(result.name, "Natrium Klorida");
        assert_eq!(result.bond_label, "Ikatan Ion");
        assert_eq!(game.translate("playAgain"), "Main Lagi");

        frame(&mut game, &mut ctx, &[custom(events::SET_LANGUAGE, 0.0)], 16);
        assert_eq!(game.language(), Language::En);
    }

    #[test]
    fn muted_effects_keep_music_cues() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, &[custom(events::TOGGLE_SOUND, 0.0)], 16);
        bond(&mut game, &mut ctx, NA, CL);
        assert!(ctx.sounds.is_empty());

        frame(&mut game, &mut ctx, &[custom(events::TOGGLE_MUSIC, 0.0)], 16);
        assert_eq!(ctx.sounds, vec![SoundEvent::from(Cue::MusicStop)]);
        assert!(!game.audio().music_enabled);
    }

    #[test]
    fn snapshot_reflects_state() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, &[custom(events::SELECT, H as f32)], 16);

        let snap = game.snapshot();
        assert_eq!(snap["screen"], "selecting");
        assert_eq!(snap["selected_a"]["symbol"], "H");
        assert!(snap["selected_b"].is_null());
        assert_eq!(snap["active_slot"], "second");
        assert!(snap["phase"].is_null());

        let inputs = [custom(events::SELECT, O as f32), custom(events::CONFIRM, 0.0)];
        frame(&mut game, &mut ctx, &inputs, 16);
        let snap = game.snapshot();
        assert_eq!(snap["phase"], "approaching");
        assert_eq!(snap["bond_type"], "covalent");
        assert_eq!(snap["audio"]["sound_enabled"], true);
    }

    #[test]
    fn picker_lists_and_filters_elements() {
        let game = BondingQuest::new();
        let all = game.element_cards("", None);
        assert_eq!(all.len(), game.catalog().len());
        assert_eq!(all[0].symbol, "H");
        assert_eq!(all[0].legend, "Nonmetals");

        let metals = game.element_cards("", Category::from_code(0));
        assert!(metals.iter().all(|card| card.category == Category::Metal));
        assert!(metals.iter().any(|card| card.symbol == "Na"));

        let found = game.element_cards("natri", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].atomic_number, NA);
    }

    #[test]
    fn picker_card_selects_that_element() {
        let (mut game, mut ctx) = started();
        let number = game.element_cards("chlor", None)[0].atomic_number;
        frame(&mut game, &mut ctx, &[custom(events::SELECT, number as f32)], 16);
        assert_eq!(game.session().selected_a(), Some(CL));
    }

    #[test]
    fn picker_json_follows_language() {
        let mut game = BondingQuest::new();
        game.set_language(Language::Id);
        let json = game.element_cards_json("S", None);
        let cards: serde_json::Value = serde_json::from_str(&json).unwrap();
        let sulfur = cards
            .as_array()
            .unwrap()
            .iter()
            .find(|card| card["symbol"] == "S")
            .unwrap();
        assert_eq!(sulfur["name"], "Belerang");
        assert_eq!(sulfur["category"], "nonmetal");

        let legend: serde_json::Value = serde_json::from_str(&game.legend_json()).unwrap();
        assert_eq!(legend.as_array().unwrap().len(), 4);
        assert_eq!(legend[3]["category"], "noble-gas");
        assert_eq!(legend[3]["code"], 3);
    }

    #[test]
    fn config_json_builds_game() {
        let json = r#"{ "points_per_bond": 250, "finish_at_ms": 4500 }"#;
        let mut game = BondingQuest::from_config_json(json).unwrap();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        frame(&mut game, &mut ctx, &[custom(events::START, 0.0)], 16);
        bond(&mut game, &mut ctx, NA, CL);
        frame(&mut game, &mut ctx, &[], 4500);
        assert_eq!(game.session().screen(), Screen::Results);
        assert_eq!(game.session().score(), 250);
    }

    #[test]
    fn bad_config_is_rejected() {
        assert!(matches!(
            BondingQuest::from_config_json(r#"{ "complete_at_ms": 1000 }"#),
            Err(ConfigError::TimingsOutOfOrder(_))
        ));
        let config = QuestConfig { finish_at_ms: 0, ..QuestConfig::default() };
        assert!(BondingQuest::with_config(config).is_err());
    }
}
