//! Screen state machine, selections, and scoring.
//!
//! menu -> selecting -> animating -> results -> selecting ...
//! Commands that do not apply to the current screen are ignored and
//! reported as `false`; they never change state.

use serde::Serialize;

/// Which screen the player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Menu,
    Selecting,
    Animating,
    Results,
}

impl Screen {
    /// Stable numeric code for the event buffer.
    pub fn code(&self) -> u32 {
        match self {
            Self::Menu => 0,
            Self::Selecting => 1,
            Self::Animating => 2,
            Self::Results => 3,
        }
    }
}

/// Selection slot on the selecting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    #[default]
    First,
    Second,
}

/// Score rules applied when a bond completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    pub points_per_bond: u32,
    pub points_per_level: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            points_per_bond: 100,
            points_per_level: 500,
        }
    }
}

impl Scoring {
    /// Level for an absolute score. Depends on nothing but the score.
    pub fn level_for(&self, score: u32) -> u32 {
        score / self.points_per_level.max(1) + 1
    }
}

/// Mutable state of one play session. Selections are atomic numbers
/// resolved against the element catalog.
#[derive(Debug, Clone)]
pub struct GameSession {
    screen: Screen,
    selected_a: Option<u32>,
    selected_b: Option<u32>,
    active_slot: Slot,
    score: u32,
    level: u32,
    scoring: Scoring,
}

impl GameSession {
    pub fn new(scoring: Scoring) -> Self {
        Self {
            screen: Screen::Menu,
            selected_a: None,
            selected_b: None,
            active_slot: Slot::First,
            score: 0,
            level: 1,
            scoring,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_a(&self) -> Option<u32> {
        self.selected_a
    }

    pub fn selected_b(&self) -> Option<u32> {
        self.selected_b
    }

    /// Both selections, when complete.
    pub fn pair(&self) -> Option<(u32, u32)> {
        self.selected_a.zip(self.selected_b)
    }

    pub fn active_slot(&self) -> Slot {
        self.active_slot
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// menu -> selecting
    pub fn start(&mut self) -> bool {
        if self.screen != Screen::Menu {
            return false;
        }
        self.screen = Screen::Selecting;
        true
    }

    /// Record the first element. Selecting screen only.
    pub fn select_first(&mut self, atomic_number: u32) -> bool {
        if self.screen != Screen::Selecting {
            return false;
        }
        self.selected_a = Some(atomic_number);
        true
    }

    /// Record the second element. Selecting screen only.
    pub fn select_second(&mut self, atomic_number: u32) -> bool {
        if self.screen != Screen::Selecting {
            return false;
        }
        self.selected_b = Some(atomic_number);
        true
    }

    /// Fill the active slot. Filling the first slot moves focus to the second.
    /// Returns the slot that was filled.
    pub fn select(&mut self, atomic_number: u32) -> Option<Slot> {
        if self.screen != Screen::Selecting {
            return None;
        }
        let slot = self.active_slot;
        match slot {
            Slot::First => {
                self.selected_a = Some(atomic_number);
                self.active_slot = Slot::Second;
            }
            Slot::Second => self.selected_b = Some(atomic_number),
        }
        Some(slot)
    }

    /// Choose which slot the next `select` fills.
    pub fn focus_slot(&mut self, slot: Slot) -> bool {
        if self.screen != Screen::Selecting {
            return false;
        }
        self.active_slot = slot;
        true
    }

    /// selecting -> animating, guarded on both selections being present.
    pub fn confirm(&mut self) -> bool {
        if self.screen != Screen::Selecting || self.pair().is_none() {
            return false;
        }
        self.screen = Screen::Animating;
        true
    }

    /// animating -> results. Awards the bond and recomputes the level.
    pub fn complete(&mut self) -> bool {
        if self.screen != Screen::Animating {
            return false;
        }
        self.screen = Screen::Results;
        self.score = self.score.saturating_add(self.scoring.points_per_bond);
        self.level = self.scoring.level_for(self.score);
        true
    }

    /// results -> selecting, with cleared selections.
    pub fn play_again(&mut self) -> bool {
        if self.screen != Screen::Results {
            return false;
        }
        self.clear_selection();
        self.screen = Screen::Selecting;
        true
    }

    /// selecting | results -> menu, with cleared selections.
    pub fn back_to_menu(&mut self) -> bool {
        if !matches!(self.screen, Screen::Selecting | Screen::Results) {
            return false;
        }
        self.clear_selection();
        self.screen = Screen::Menu;
        true
    }

    fn clear_selection(&mut self) {
        self.selected_a = None;
        self.selected_b = None;
        self.active_slot = Slot::First;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Scoring::default())
    }
}
