//! Engine ports
//!
//! The run logic talks to the host engine only through these narrow traits.
//! Handlers on `PlayScene` borrow a `&mut impl Host` for the duration of a
//! call; the core never keeps a reference to it.

use serde::{Deserialize, Serialize};

use super::state::BodyProfile;
use crate::audio::SoundEffect;

/// Character textures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Texture {
    /// Pre-game standing pose
    DinoIdle,
    /// Run sheet; frame 0 doubles as the jump pose
    Dino,
    DinoHurt,
}

/// Named animation clips (sprite sheet, frame range, rate, loop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationClip {
    DinoRun,
    DinoDown,
    BirdFly,
}

impl AnimationClip {
    /// Sprite sheet key
    pub fn sheet(&self) -> &'static str {
        match self {
            AnimationClip::DinoRun => "dino",
            AnimationClip::DinoDown => "dino-down",
            AnimationClip::BirdFly => "enemy-bird",
        }
    }

    /// Inclusive frame range within the sheet
    pub fn frames(&self) -> (u32, u32) {
        match self {
            AnimationClip::DinoRun => (2, 3),
            AnimationClip::DinoDown => (0, 1),
            AnimationClip::BirdFly => (0, 1),
        }
    }

    pub fn frame_rate(&self) -> u32 {
        match self {
            AnimationClip::BirdFly => 6,
            _ => 10,
        }
    }

    /// Every clip here loops forever
    pub fn looped(&self) -> bool {
        true
    }
}

/// Layers whose visibility the core controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Parallax clouds
    Environment,
    /// "Game over" text and restart button
    GameOverOverlay,
}

/// Score text blink: fade to alpha 0 and back, `repeat` extra times
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreFlash {
    pub duration_ms: f64,
    pub repeat: u32,
    pub yoyo: bool,
}

impl Default for ScoreFlash {
    fn default() -> Self {
        Self {
            duration_ms: 100.0,
            repeat: 3,
            yoyo: true,
        }
    }
}

/// Repeating timers the core schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerId {
    /// Progression tick (score and speed)
    Score,
    /// Start sequence runway step
    Runway,
}

/// Player inputs the host forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Jump,
    DuckPressed,
    DuckReleased,
    RestartClicked,
}

/// Character physics (gravity, velocity, body box)
pub trait PhysicsPort {
    /// Character body is resting on the ground
    fn is_grounded(&self) -> bool;
    /// Absolute vertical movement during the last physics step
    fn vertical_delta(&self) -> f32;
    /// Current vertical velocity (negative = up)
    fn vertical_velocity(&self) -> f32;
    fn set_character_gravity(&mut self, gravity: f32);
    fn set_character_velocity_x(&mut self, vx: f32);
    fn set_character_velocity_y(&mut self, vy: f32);
    fn set_character_body(&mut self, body: BodyProfile);
    /// Freeze the whole physics world
    fn pause_physics(&mut self);
}

/// Sprite, animation and HUD output
pub trait RenderPort {
    fn set_character_texture(&mut self, texture: Texture, frame: u32);
    /// Play a looped clip (no restart if already playing)
    fn play_character_clip(&mut self, clip: AnimationClip);
    fn stop_character_animation(&mut self);
    fn pause_all_animations(&mut self);
    fn set_layer_alpha(&mut self, layer: Layer, alpha: f32);
    fn set_score_text(&mut self, text: &str);
    fn flash_score(&mut self, flash: ScoreFlash);
}

/// Sound output
pub trait AudioPort {
    fn play_sound(&mut self, sound: SoundEffect, volume: f32);
}

/// Repeating timers; the host calls back into the matching `PlayScene` handler
pub trait TimerPort {
    /// Start (or restart) a repeating timer
    fn start_repeating(&mut self, id: TimerId, period_ms: f64);
    /// Stop a timer; no further firings may be delivered after this returns
    fn cancel(&mut self, id: TimerId);
}

/// Process-level control
pub trait HostPort {
    /// Tear everything down and rebuild a fresh scene
    fn request_reload(&mut self);
}

/// Everything the run logic needs from the engine
pub trait Host: PhysicsPort + RenderPort + AudioPort + TimerPort + HostPort {}

impl<T> Host for T where T: PhysicsPort + RenderPort + AudioPort + TimerPort + HostPort {}
