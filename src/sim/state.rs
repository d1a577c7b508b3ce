//! Run state and core simulation types
//!
//! Everything a host needs to draw a frame lives here. The controller owns the
//! only mutable copy and hands out `&GameState` snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::host::AnimationClip;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World static, waiting for the character to hit the start trigger
    PreGame,
    /// Runway extending at a fixed step rate
    Starting,
    /// Active gameplay
    Running,
    /// Character hit an obstacle; terminal until reload
    GameOver,
}

/// Speed, score and spawn bookkeeping for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub is_running: bool,
    /// Scroll distance per frame (pixels)
    pub game_speed: f32,
    /// Grows with time and speed; a spawn fires when it crosses the threshold
    pub respawn_accumulator: f32,
    pub score: u32,
}

impl RunState {
    pub fn new(initial_speed: f32) -> Self {
        Self {
            is_running: false,
            game_speed: initial_speed.max(0.0),
            respawn_accumulator: 0.0,
            score: 0,
        }
    }
}

/// Character collision body profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyProfile {
    #[default]
    Standing,
    Ducking,
}

impl BodyProfile {
    pub fn width(&self) -> f32 {
        CHARACTER_BODY_WIDTH
    }

    pub fn height(&self) -> f32 {
        match self {
            BodyProfile::Standing => CHARACTER_STANDING_HEIGHT,
            BodyProfile::Ducking => CHARACTER_DUCKING_HEIGHT,
        }
    }

    /// Offset of the body top below the sprite top
    pub fn offset_y(&self) -> f32 {
        match self {
            BodyProfile::Standing => 0.0,
            BodyProfile::Ducking => CHARACTER_DUCKING_OFFSET,
        }
    }

    /// Body box for a character whose sprite bottom-left sits at (x, bottom)
    pub fn bounds(&self, x: f32, bottom: f32) -> Aabb {
        let top = bottom - CHARACTER_STANDING_HEIGHT + self.offset_y();
        Aabb::new(
            Vec2::new(x, top),
            Vec2::new(x + self.width(), top + self.height()),
        )
    }
}

/// Character animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    /// Static texture (pre-game and airborne)
    #[default]
    Idle,
    Running,
    Ducking,
    /// Terminal; set only by collision
    Hurt,
}

/// The player character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    /// Last vertical velocity reported by physics (negative = up)
    pub vertical_velocity: f32,
    pub body: BodyProfile,
    pub grounded: bool,
    pub animation: AnimationState,
}

impl Character {
    pub fn new() -> Self {
        Self {
            grounded: true,
            ..Default::default()
        }
    }

    pub fn is_hurt(&self) -> bool {
        self.animation == AnimationState::Hurt
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cactus1,
    Cactus2,
    Cactus3,
    Cactus4,
    Cactus5,
    Cactus6,
    Bird,
}

impl ObstacleKind {
    /// Every kind, in draw order (index + 1 is the kind number)
    pub const ALL: [ObstacleKind; 7] = [
        ObstacleKind::Cactus1,
        ObstacleKind::Cactus2,
        ObstacleKind::Cactus3,
        ObstacleKind::Cactus4,
        ObstacleKind::Cactus5,
        ObstacleKind::Cactus6,
        ObstacleKind::Bird,
    ];

    /// Map a draw in 1..=7 to a kind (7 is the bird)
    pub fn from_number(n: u32) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub fn is_aerial(&self) -> bool {
        matches!(self, ObstacleKind::Bird)
    }

    /// Sprite size (width, height)
    pub fn sprite_size(&self) -> (f32, f32) {
        match self {
            ObstacleKind::Cactus1 => (34.0, 70.0),
            ObstacleKind::Cactus2 => (68.0, 70.0),
            ObstacleKind::Cactus3 => (102.0, 70.0),
            ObstacleKind::Cactus4 => (50.0, 96.0),
            ObstacleKind::Cactus5 => (100.0, 96.0),
            ObstacleKind::Cactus6 => (150.0, 96.0),
            ObstacleKind::Bird => (92.0, 77.0),
        }
    }

    /// Texture key the host loads the sprite under
    pub fn texture_key(&self) -> &'static str {
        match self {
            ObstacleKind::Cactus1 => "obsticle-1",
            ObstacleKind::Cactus2 => "obsticle-2",
            ObstacleKind::Cactus3 => "obsticle-3",
            ObstacleKind::Cactus4 => "obsticle-4",
            ObstacleKind::Cactus5 => "obsticle-5",
            ObstacleKind::Cactus6 => "obsticle-6",
            ObstacleKind::Bird => "enemy-bird",
        }
    }
}

/// An obstacle, anchored at its bottom-left corner and immovable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Body top offset below the sprite top
    pub body_offset_y: f32,
    /// Height of the hit-test box
    pub body_height: f32,
    /// Looping clip, if the sprite animates
    pub clip: Option<AnimationClip>,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Hit-test rectangle
    pub fn body(&self) -> Aabb {
        let top = self.y - self.height + self.body_offset_y;
        Aabb::new(
            Vec2::new(self.x, top),
            Vec2::new(self.x + self.width, top + self.body_height),
        )
    }

    /// Right edge has passed the left edge of the viewport
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// A parallax cloud (center-anchored, recycled instead of destroyed)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
}

impl Cloud {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + CLOUD_WIDTH / 2.0
    }
}

/// Visible runway strip
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ground {
    /// Visible width (grows during the start sequence)
    pub width: f32,
    /// Texture scroll offset
    pub tile_offset: f32,
}

/// One-shot region that starts the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartTrigger {
    /// Bottom-left anchor
    pub pos: Vec2,
    pub size: Vec2,
    pub consumed: bool,
}

impl StartTrigger {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(0.0, START_TRIGGER_Y),
            size: Vec2::splat(START_TRIGGER_SIZE),
            consumed: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_bottom_left(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

impl Default for StartTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    /// Also the ground line
    pub height: f32,
}

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub run: RunState,
    pub character: Character,
    /// Live obstacles (sorted by id for determinism)
    pub obstacles: Vec<Obstacle>,
    /// Fixed set of parallax clouds
    pub clouds: Vec<Cloud>,
    pub ground: Ground,
    pub start_trigger: StartTrigger,
    pub viewport: Viewport,
    /// Frames ticked since creation
    pub frame: u64,
    /// Runway steps taken by the start sequence
    pub runway_steps: u32,
}

impl GameState {
    /// Create the pre-game state for the given tuning
    pub fn new(tuning: &Tuning) -> Self {
        let width = tuning.viewport_width;
        Self {
            phase: GamePhase::PreGame,
            run: RunState::new(tuning.initial_game_speed),
            character: Character::new(),
            obstacles: Vec::new(),
            clouds: vec![
                Cloud::new(width / 2.0, 170.0),
                Cloud::new(width - 88.0, 80.0),
                Cloud::new(width / 1.39, 110.0),
            ],
            ground: Ground::default(),
            start_trigger: StartTrigger::new(),
            viewport: Viewport {
                width,
                height: tuning.viewport_height,
            },
            frame: 0,
            runway_steps: 0,
        }
    }

    /// Ensure obstacles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_pregame() {
        let state = GameState::new(&Tuning::default());
        assert_eq!(state.phase, GamePhase::PreGame);
        assert!(!state.run.is_running);
        assert_eq!(state.run.game_speed, 10.0);
        assert_eq!(state.run.score, 0);
        assert_eq!(state.ground.width, 0.0);
        assert_eq!(state.clouds.len(), 3);
        assert!(state.obstacles.is_empty());
        assert!(!state.start_trigger.consumed);
    }

    #[test]
    fn test_kind_numbers() {
        assert_eq!(ObstacleKind::from_number(1), Some(ObstacleKind::Cactus1));
        assert_eq!(ObstacleKind::from_number(7), Some(ObstacleKind::Bird));
        assert_eq!(ObstacleKind::from_number(0), None);
        assert_eq!(ObstacleKind::from_number(8), None);
        assert!(ObstacleKind::Bird.is_aerial());
        assert!(!ObstacleKind::Cactus6.is_aerial());
    }

    #[test]
    fn test_ducking_body_keeps_bottom_on_ground() {
        let standing = BodyProfile::Standing.bounds(0.0, 340.0);
        let ducking = BodyProfile::Ducking.bounds(0.0, 340.0);
        assert_eq!(standing.bottom(), 340.0);
        assert_eq!(ducking.bottom(), 340.0);
        assert_eq!(standing.height(), 92.0);
        assert_eq!(ducking.height(), 58.0);
    }

    #[test]
    fn test_obstacle_offscreen_edge() {
        let mut obstacle = Obstacle {
            id: 1,
            kind: ObstacleKind::Cactus1,
            x: -34.0,
            y: 340.0,
            width: 34.0,
            height: 70.0,
            body_offset_y: 10.0,
            body_height: 70.0,
            clip: None,
        };
        // Right edge exactly at 0 is still on screen
        assert!(!obstacle.is_offscreen());
        obstacle.x -= 0.01;
        assert!(obstacle.is_offscreen());
    }
}
