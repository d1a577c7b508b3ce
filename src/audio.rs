//! Sound cue catalogue
//!
//! The core never decodes or mixes audio. It names a cue and a volume and the
//! host's `AudioPort` plays the matching clip.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Character leaves the ground
    Jump,
    /// Character hits an obstacle
    Hit,
    /// Score reached a minor milestone
    Reach,
    /// Score reached a major milestone
    TrexRoar,
}

impl SoundEffect {
    /// Asset key the host loads the clip under
    pub fn asset_key(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Hit => "hit",
            SoundEffect::Reach => "reach",
            SoundEffect::TrexRoar => "trex-roar",
        }
    }

    /// Volume before the player's mix is applied
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::TrexRoar => 1.0,
            _ => 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roar_is_loudest() {
        assert_eq!(SoundEffect::TrexRoar.base_volume(), 1.0);
        assert_eq!(SoundEffect::Hit.base_volume(), 0.8);
        assert_eq!(SoundEffect::TrexRoar.asset_key(), "trex-roar");
    }
}
