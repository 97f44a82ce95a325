//! Timed phases of the bonding animation.
//!
//! A `BondingSequence` exists only while the session is animating. It owns
//! its timers, so dropping it (teardown, or replacing it with a new run)
//! leaves nothing behind that could fire later.

use quest_engine::Scheduler;
use serde::Serialize;

use crate::chemistry::BondType;

/// Visual phase of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Approaching,
    Bonding,
    Complete,
}

impl Phase {
    /// Stable numeric code for the event buffer.
    pub fn code(&self) -> u32 {
        match self {
            Self::Approaching => 0,
            Self::Bonding => 1,
            Self::Complete => 2,
        }
    }
}

/// Offsets from animation start, in milliseconds. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimings {
    pub bonding_at_ms: u64,
    pub complete_at_ms: u64,
    pub finish_at_ms: u64,
}

impl PhaseTimings {
    /// True when bonding, complete, and finish come in that order with no ties.
    pub fn is_ordered(&self) -> bool {
        self.bonding_at_ms < self.complete_at_ms && self.complete_at_ms < self.finish_at_ms
    }
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            bonding_at_ms: 2000,
            complete_at_ms: 4000,
            finish_at_ms: 5500,
        }
    }
}

/// Timer payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    EnterBonding,
    EnterComplete,
    Finish,
}

/// What the sequence reports to its owner as time passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSignal {
    PhaseChanged(Phase),
    /// The animation is over; the owner should show results.
    Finished,
}

/// One run of the bonding animation.
#[derive(Debug)]
pub struct BondingSequence {
    timers: Scheduler<Cue>,
    phase: Phase,
    bond_type: BondType,
    finished: bool,
}

impl BondingSequence {
    /// Start a run: phase `Approaching`, with all three timers scheduled from now.
    pub fn start(bond_type: BondType, timings: PhaseTimings) -> Self {
        let mut timers = Scheduler::new();
        timers.schedule_after(timings.bonding_at_ms, Cue::EnterBonding);
        timers.schedule_after(timings.complete_at_ms, Cue::EnterComplete);
        timers.schedule_after(timings.finish_at_ms, Cue::Finish);
        log::debug!("bonding sequence started ({:?})", bond_type);

        Self {
            timers,
            phase: Phase::Approaching,
            bond_type,
            finished: false,
        }
    }

    /// Advance time. Returns every signal raised, in firing order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<SequenceSignal> {
        self.timers
            .advance(dt_ms)
            .into_iter()
            .map(|cue| self.apply(cue))
            .collect()
    }

    fn apply(&mut self, cue: Cue) -> SequenceSignal {
        match cue {
            Cue::EnterBonding => {
                self.phase = Phase::Bonding;
                SequenceSignal::PhaseChanged(Phase::Bonding)
            }
            Cue::EnterComplete => {
                self.phase = Phase::Complete;
                SequenceSignal::PhaseChanged(Phase::Complete)
            }
            Cue::Finish => {
                self.finished = true;
                SequenceSignal::Finished
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Bond type classified once at the start of the run.
    pub fn bond_type(&self) -> BondType {
        self.bond_type
    }

    /// Milliseconds since the run started.
    pub fn elapsed_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
