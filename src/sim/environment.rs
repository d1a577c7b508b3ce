//! Ground runway and parallax clouds
//!
//! The ground scrolls at the game speed; clouds drift at a fixed slower rate
//! and wrap around instead of being destroyed.

use super::state::{Cloud, Ground};

/// Grow the runway by one step. Returns true once it covers the viewport,
/// at which point the width is snapped to exactly `viewport_width`.
pub fn extend_runway(ground: &mut Ground, viewport_width: f32, increment: f32) -> bool {
    if ground.width < viewport_width {
        ground.width += increment;
    }
    if ground.width >= viewport_width {
        ground.width = viewport_width;
        return true;
    }
    false
}

/// Scroll the ground texture
pub fn scroll_ground(ground: &mut Ground, speed: f32) {
    ground.tile_offset += speed;
}

/// Drift every cloud left
pub fn scroll_clouds(clouds: &mut [Cloud], speed: f32) {
    for cloud in clouds.iter_mut() {
        cloud.pos.x -= speed;
    }
}

/// Move clouds that left the screen back past the right edge
pub fn recycle_clouds(clouds: &mut [Cloud], viewport_width: f32, margin: f32) -> usize {
    let mut recycled = 0;
    for cloud in clouds.iter_mut() {
        if cloud.right() < 0.0 {
            cloud.pos.x = viewport_width + margin;
            recycled += 1;
        }
    }
    recycled
}
