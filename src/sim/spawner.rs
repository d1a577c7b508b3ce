//! Obstacle spawning and cleanup
//!
//! Kinds, offsets and bird altitudes are drawn from a seeded PCG stream so a
//! run is reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::host::AnimationClip;
use super::state::{Obstacle, ObstacleKind, Viewport};
use crate::tuning::Tuning;

/// Places obstacles ahead of the viewport
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Draw a kind uniformly from the 7 variants
    pub fn draw_kind(&mut self) -> ObstacleKind {
        let n = self.rng.random_range(1..=ObstacleKind::ALL.len() as u32);
        ObstacleKind::from_number(n).unwrap_or(ObstacleKind::Cactus1)
    }

    /// Draw the distance past the right edge
    pub fn draw_distance(&mut self, tuning: &Tuning) -> u32 {
        self.rng
            .random_range(tuning.spawn_distance_min..=tuning.spawn_distance_max)
    }

    /// Create one obstacle past the right edge of the viewport
    pub fn place_obstacle(&mut self, viewport: &Viewport, tuning: &Tuning) -> Obstacle {
        let kind = self.draw_kind();
        let distance = self.draw_distance(tuning);
        let (width, height) = kind.sprite_size();
        let x = viewport.width + distance as f32;

        let id = self.next_id;
        self.next_id += 1;

        let obstacle = if kind.is_aerial() {
            let altitude = tuning.bird_altitudes[self.rng.random_range(0..2)];
            Obstacle {
                id,
                kind,
                x,
                y: viewport.height - altitude,
                width,
                height,
                body_offset_y: 0.0,
                body_height: height / tuning.bird_body_divisor,
                clip: Some(AnimationClip::BirdFly),
            }
        } else {
            Obstacle {
                id,
                kind,
                x,
                y: viewport.height,
                width,
                height,
                body_offset_y: tuning.cactus_body_offset,
                body_height: height,
                clip: None,
            }
        };

        log::debug!(
            "Spawned obstacle {} ({}) at distance {}",
            id,
            kind.texture_key(),
            distance
        );
        obstacle
    }
}

/// Drop every obstacle whose right edge has left the viewport
pub fn cleanup_offscreen(obstacles: &mut Vec<Obstacle>) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_offscreen());
    let removed = before - obstacles.len();
    if removed > 0 {
        log::debug!("Removed {} off-screen obstacle(s)", removed);
    }
    removed
}
