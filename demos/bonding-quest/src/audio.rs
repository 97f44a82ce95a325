//! Sound cues and the player's audio settings.
//!
//! Cues are fire-and-forget: the TypeScript sound layer plays them or not,
//! and nothing comes back.

use quest_engine::{EngineContext, SoundEvent};
use serde::Serialize;

use crate::chemistry::BondType;

/// Sound cue IDs shared with the TypeScript sound layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Cue {
    Click = 1,
    Success = 2,
    IonicBonding = 3,
    CovalentBonding = 4,
    MetallicBonding = 5,
    MusicStart = 6,
    MusicStop = 7,
}

impl Cue {
    /// Cue played when a bond of this type starts forming.
    pub fn bonding(bond_type: BondType) -> Self {
        match bond_type {
            BondType::Ionic => Self::IonicBonding,
            BondType::Covalent => Self::CovalentBonding,
            BondType::Metallic => Self::MetallicBonding,
        }
    }

    fn is_music(&self) -> bool {
        matches!(self, Self::MusicStart | Self::MusicStop)
    }
}

impl From<Cue> for SoundEvent {
    fn from(cue: Cue) -> Self {
        SoundEvent(cue as u32)
    }
}

/// Sound effect and music toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioSettings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
        }
    }
}

impl AudioSettings {
    /// Emit a cue unless its channel is muted.
    pub fn play(&self, ctx: &mut EngineContext, cue: Cue) {
        let enabled = if cue.is_music() {
            self.music_enabled
        } else {
            self.sound_enabled
        };
        if enabled {
            log::debug!("cue {:?}", cue);
            ctx.emit_sound(cue.into());
        }
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Flip music and emit the matching start/stop cue.
    pub fn toggle_music(&mut self, ctx: &mut EngineContext) -> bool {
        if self.music_enabled {
            self.play(ctx, Cue::MusicStop);
            self.music_enabled = false;
        } else {
            self.music_enabled = true;
            self.play(ctx, Cue::MusicStart);
        }
        self.music_enabled
    }
}
