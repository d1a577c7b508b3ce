//! Dino Dash - gameplay core for a side-scrolling infinite runner
//!
//! Core modules:
//! - `sim`: Deterministic run logic (phases, spawning, character, scoring)
//! - `platform`: Headless host implementing the engine ports
//! - `audio`: Sound cue catalogue
//! - `tuning`: Data-driven game balance
//! - `settings`: Player audio preferences

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Sprite and body dimensions (pixels)
pub mod consts {
    /// Host frame rate the headless runtime steps at
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum frames per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Character collision box width
    pub const CHARACTER_BODY_WIDTH: f32 = 44.0;
    /// Character collision box height while standing
    pub const CHARACTER_STANDING_HEIGHT: f32 = 92.0;
    /// Character collision box height while ducking
    pub const CHARACTER_DUCKING_HEIGHT: f32 = 58.0;
    /// Vertical body offset while ducking (keeps the box bottom on the ground)
    pub const CHARACTER_DUCKING_OFFSET: f32 = 34.0;

    /// Ground strip texture height
    pub const GROUND_IMAGE_HEIGHT: f32 = 26.0;

    /// Cloud sprite size
    pub const CLOUD_WIDTH: f32 = 92.0;
    pub const CLOUD_HEIGHT: f32 = 27.0;

    /// Start trigger region (invisible, 32x32 default body)
    pub const START_TRIGGER_SIZE: f32 = 32.0;
    /// Start trigger bottom edge (near the top of the viewport)
    pub const START_TRIGGER_Y: f32 = 10.0;
}
