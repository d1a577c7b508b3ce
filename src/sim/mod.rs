//! Deterministic run simulation
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Engine capabilities only through the `host` ports
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering, audio or platform dependencies

pub mod character;
pub mod collision;
pub mod environment;
pub mod host;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use host::{
    AnimationClip, AudioPort, Host, HostPort, InputEvent, Layer, PhysicsPort, RenderPort,
    ScoreFlash, TimerId, TimerPort, Texture,
};
pub use progression::{ScoreTick, format_score};
pub use spawner::ObstacleSpawner;
pub use state::{
    AnimationState, BodyProfile, Character, Cloud, GamePhase, GameState, Ground, Obstacle,
    ObstacleKind, RunState, StartTrigger, Viewport,
};
pub use tick::PlayScene;
