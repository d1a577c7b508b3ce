//! Data-driven game balance
//!
//! Every gameplay constant lives here so hosts can load a JSON file instead
//! of recompiling. Missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// File could not be read
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON was malformed or had the wrong shape
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value must be strictly positive
    #[error("{field} must be > 0 (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    /// Spawn distance range is inverted
    #[error("spawn distance range is inverted ({min} > {max})")]
    InvertedSpawnRange { min: u32, max: u32 },

    /// Gameplay speed cannot start negative
    #[error("initial game speed must be >= 0 (got {0})")]
    NegativeSpeed(f32),
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels (ground line)
    pub viewport_height: f32,

    /// Scroll speed at the start of a run (pixels per frame)
    pub initial_game_speed: f32,
    /// Gravity applied to the character (pixels/s²)
    pub gravity: f32,
    /// Upward velocity applied on jump (pixels/s)
    pub jump_impulse: f32,

    /// Closest spawn offset past the right edge
    pub spawn_distance_min: u32,
    /// Farthest spawn offset past the right edge
    pub spawn_distance_max: u32,
    /// Accumulator value that triggers a spawn
    pub spawn_threshold: f32,
    /// Accumulator scale: `delta_ms * speed * scale`
    pub respawn_scale: f32,

    /// Progression timer period
    pub score_tick_ms: f64,
    /// Speed added on every progression tick
    pub speed_increment: f32,
    /// Minor milestone interval (sound + flash)
    pub milestone_interval: u32,
    /// Major milestone interval (roar)
    pub roar_interval: u32,

    /// Runway growth per step during the start sequence
    pub runway_increment: f32,
    /// Start sequence step rate
    pub runway_rate_hz: f64,
    /// Character horizontal velocity while the runway extends
    pub runway_run_velocity: f32,

    /// Cloud scroll per frame (slower than ground for parallax)
    pub cloud_scroll_speed: f32,
    /// Distance past the right edge where clouds reappear
    pub cloud_recycle_margin: f32,

    /// Cactus body offset below the sprite top
    pub cactus_body_offset: f32,
    /// Bird body height divisor
    pub bird_body_divisor: f32,
    /// Bird altitudes above the ground line
    pub bird_altitudes: [f32; 2],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: 1000.0,
            viewport_height: 340.0,

            initial_game_speed: 10.0,
            gravity: 5000.0,
            jump_impulse: 1600.0,

            spawn_distance_min: 600,
            spawn_distance_max: 900,
            spawn_threshold: 1500.0,
            respawn_scale: 0.08,

            score_tick_ms: 100.0,
            speed_increment: 0.01,
            milestone_interval: 100,
            roar_interval: 500,

            runway_increment: 34.0,
            runway_rate_hz: 60.0,
            runway_run_velocity: 80.0,

            cloud_scroll_speed: 0.5,
            cloud_recycle_margin: 30.0,

            cactus_body_offset: 10.0,
            bird_body_divisor: 1.5,
            bird_altitudes: [22.0, 50.0],
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("viewport_width", self.viewport_width as f64)?;
        positive("viewport_height", self.viewport_height as f64)?;
        positive("gravity", self.gravity as f64)?;
        positive("jump_impulse", self.jump_impulse as f64)?;
        positive("speed_increment", self.speed_increment as f64)?;
        positive("cloud_scroll_speed", self.cloud_scroll_speed as f64)?;
        positive("spawn_threshold", self.spawn_threshold as f64)?;
        positive("respawn_scale", self.respawn_scale as f64)?;
        positive("score_tick_ms", self.score_tick_ms)?;
        positive("milestone_interval", self.milestone_interval as f64)?;
        positive("roar_interval", self.roar_interval as f64)?;
        positive("runway_increment", self.runway_increment as f64)?;
        positive("runway_rate_hz", self.runway_rate_hz)?;
        positive("bird_body_divisor", self.bird_body_divisor as f64)?;

        if self.initial_game_speed < 0.0 {
            return Err(TuningError::NegativeSpeed(self.initial_game_speed));
        }
        if self.spawn_distance_min > self.spawn_distance_max {
            return Err(TuningError::InvertedSpawnRange {
                min: self.spawn_distance_min,
                max: self.spawn_distance_max,
            });
        }
        Ok(())
    }

    /// Period of the start sequence timer
    pub fn runway_period_ms(&self) -> f64 {
        1000.0 / self.runway_rate_hz
    }

    /// Number of runway steps needed to cover the viewport
    pub fn runway_steps(&self) -> u32 {
        (self.viewport_width / self.runway_increment).ceil() as u32
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.initial_game_speed, 10.0);
        assert_eq!(tuning.spawn_distance_min, 600);
        assert_eq!(tuning.spawn_distance_max, 900);
        assert_eq!(tuning.spawn_threshold, 1500.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "viewport_width": 600.0 }"#).unwrap();
        assert_eq!(tuning.viewport_width, 600.0);
        assert_eq!(tuning.gravity, 5000.0);
        assert_eq!(tuning.runway_steps(), 18);
    }

    #[test]
    fn test_inverted_spawn_range_rejected() {
        let err = Tuning::from_json(r#"{ "spawn_distance_min": 900, "spawn_distance_max": 600 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::InvertedSpawnRange { min: 900, max: 600 }
        ));
    }

    #[test]
    fn test_zero_increment_rejected() {
        let err = Tuning::from_json(r#"{ "runway_increment": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "runway_increment",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_speed_increment_rejected() {
        let err = Tuning::from_json(r#"{ "speed_increment": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "speed_increment",
                ..
            }
        ));
    }

    #[test]
    fn test_physics_values_must_be_positive() {
        for field in ["gravity", "jump_impulse", "cloud_scroll_speed"] {
            let json = format!(r#"{{ "{field}": 0.0 }}"#);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(
                matches!(err, TuningError::NotPositive { field: f, .. } if f == field),
                "{field} accepted"
            );
        }
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert!(err.to_string().contains("tuning.json"));
    }
}
