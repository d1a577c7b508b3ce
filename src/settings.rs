//! Player preferences
//!
//! Only audio mixing is configurable; gameplay balance lives in `tuning`.

use serde::{Deserialize, Serialize};

/// Audio preferences applied on top of each cue's base volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence every cue
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Scale a cue's base volume by the player's mix
    pub fn effective_volume(&self, base: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (base * self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0))
                .clamp(0.0, 1.0)
        }
    }
}
