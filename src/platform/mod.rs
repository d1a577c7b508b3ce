//! Platform layer
//!
//! A headless implementation of the engine ports:
//! - Character physics (gravity, world bounds, AABB overlap events)
//! - Repeating timers on a simulated clock
//! - Recorded render and audio output
//!
//! `HeadlessRuntime` drives a `PlayScene` at a fixed frame rate the way a
//! browser or desktop host would, which makes whole runs reproducible.

pub mod autopilot;

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{
    Aabb, AnimationClip, AudioPort, BodyProfile, GamePhase, GameState, HostPort, InputEvent,
    Layer, PhysicsPort, PlayScene, RenderPort, ScoreFlash, Texture, TimerId, TimerPort,
};
use crate::tuning::{Tuning, TuningError};

/// Timer firings closer than this to "now" count as due
const TIMER_EPSILON_MS: f64 = 1e-6;

/// Longest host frame accepted by `HeadlessRuntime::advance`
const MAX_FRAME_DELTA_MS: f64 = 100.0;

/// Events produced by a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsEvent {
    /// Character body overlaps an obstacle body
    Collision,
    /// Character body overlaps the unconsumed start trigger
    StartTriggerOverlap,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    period_ms: f64,
    next_fire_ms: f64,
}

/// Engine stand-in with just enough physics for one runner
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    // Physics
    /// Sprite bottom-left corner
    pos: Vec2,
    vel: Vec2,
    gravity: f32,
    body: BodyProfile,
    grounded: bool,
    last_delta: f32,
    physics_paused: bool,
    viewport: Vec2,

    // Timers
    clock_ms: f64,
    timers: Vec<Timer>,

    // Render output
    pub texture: (Texture, u32),
    pub clip: Option<AnimationClip>,
    pub animations_paused: bool,
    pub environment_alpha: f32,
    pub overlay_alpha: f32,
    pub score_text: String,
    pub score_flashes: u32,

    // Audio output
    pub sounds: Vec<(SoundEffect, f32)>,

    reload_requested: bool,
}

impl HeadlessHost {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(0.0, tuning.viewport_height),
            vel: Vec2::ZERO,
            gravity: 0.0,
            body: BodyProfile::Standing,
            grounded: true,
            last_delta: 0.0,
            physics_paused: false,
            viewport: Vec2::new(tuning.viewport_width, tuning.viewport_height),
            clock_ms: 0.0,
            timers: Vec::new(),
            texture: (Texture::DinoIdle, 0),
            clip: None,
            animations_paused: false,
            environment_alpha: 1.0,
            overlay_alpha: 1.0,
            score_text: String::new(),
            score_flashes: 0,
            sounds: Vec::new(),
            reload_requested: false,
        }
    }

    /// Character body box in screen space
    pub fn character_bounds(&self) -> Aabb {
        self.body.bounds(self.pos.x, self.pos.y)
    }

    pub fn physics_paused(&self) -> bool {
        self.physics_paused
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn timer_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// How many times a sound has played
    pub fn sound_count(&self, sound: SoundEffect) -> usize {
        self.sounds.iter().filter(|(s, _)| *s == sound).count()
    }

    /// Integrate character motion and report overlaps against `state`
    pub fn step_physics(&mut self, dt_ms: f64, state: &GameState) -> Vec<PhysicsEvent> {
        if self.physics_paused {
            self.last_delta = 0.0;
            return Vec::new();
        }

        let dt = (dt_ms / 1000.0) as f32;
        let prev_y = self.pos.y;

        self.vel.y += self.gravity * dt;
        self.pos += self.vel * dt;

        // World bounds
        let ground = self.viewport.y;
        if self.pos.y >= ground {
            self.pos.y = ground;
            self.vel.y = self.vel.y.min(0.0);
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        if self.pos.y - CHARACTER_STANDING_HEIGHT < 0.0 {
            self.pos.y = CHARACTER_STANDING_HEIGHT;
            self.vel.y = self.vel.y.max(0.0);
        }
        self.pos.x = self.pos.x.clamp(0.0, self.viewport.x - CHARACTER_BODY_WIDTH);

        self.last_delta = (self.pos.y - prev_y).abs();

        let body = self.character_bounds();
        let mut events = Vec::new();
        if !state.start_trigger.consumed && body.overlaps(&state.start_trigger.bounds()) {
            events.push(PhysicsEvent::StartTriggerOverlap);
        }
        if state.obstacles.iter().any(|o| body.overlaps(&o.body())) {
            events.push(PhysicsEvent::Collision);
        }
        events
    }

    /// Move the simulated clock forward
    pub fn advance_clock(&mut self, dt_ms: f64) {
        self.clock_ms += dt_ms;
    }

    /// Pop the earliest timer that is due, rescheduling it
    pub fn pop_due_timer(&mut self) -> Option<TimerId> {
        let now = self.clock_ms + TIMER_EPSILON_MS;
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_fire_ms <= now)
            .min_by(|a, b| a.next_fire_ms.total_cmp(&b.next_fire_ms))?;
        timer.next_fire_ms += timer.period_ms;
        Some(timer.id)
    }

    /// Consume a pending reload request
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }
}

impl PhysicsPort for HeadlessHost {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn vertical_delta(&self) -> f32 {
        self.last_delta
    }

    fn vertical_velocity(&self) -> f32 {
        self.vel.y
    }

    fn set_character_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    fn set_character_velocity_x(&mut self, vx: f32) {
        self.vel.x = vx;
    }

    fn set_character_velocity_y(&mut self, vy: f32) {
        self.vel.y = vy;
    }

    fn set_character_body(&mut self, body: BodyProfile) {
        self.body = body;
    }

    fn pause_physics(&mut self) {
        self.physics_paused = true;
    }
}

impl RenderPort for HeadlessHost {
    fn set_character_texture(&mut self, texture: Texture, frame: u32) {
        self.texture = (texture, frame);
    }

    fn play_character_clip(&mut self, clip: AnimationClip) {
        let (first, last) = clip.frames();
        log::debug!(
            "Clip {} frames {}..={} at {} fps{}",
            clip.sheet(),
            first,
            last,
            clip.frame_rate(),
            if clip.looped() { ", looped" } else { "" }
        );
        self.clip = Some(clip);
    }

    fn stop_character_animation(&mut self) {
        self.clip = None;
    }

    fn pause_all_animations(&mut self) {
        self.animations_paused = true;
    }

    fn set_layer_alpha(&mut self, layer: Layer, alpha: f32) {
        match layer {
            Layer::Environment => self.environment_alpha = alpha,
            Layer::GameOverOverlay => self.overlay_alpha = alpha,
        }
    }

    fn set_score_text(&mut self, text: &str) {
        self.score_text.clear();
        self.score_text.push_str(text);
    }

    fn flash_score(&mut self, _flash: ScoreFlash) {
        self.score_flashes += 1;
    }
}

impl AudioPort for HeadlessHost {
    fn play_sound(&mut self, sound: SoundEffect, volume: f32) {
        log::debug!("Sound {} at {:.2}", sound.asset_key(), volume);
        self.sounds.push((sound, volume));
    }
}

impl TimerPort for HeadlessHost {
    fn start_repeating(&mut self, id: TimerId, period_ms: f64) {
        self.timers.retain(|t| t.id != id);
        self.timers.push(Timer {
            id,
            period_ms,
            next_fire_ms: self.clock_ms + period_ms,
        });
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}

impl HostPort for HeadlessHost {
    fn request_reload(&mut self) {
        self.reload_requested = true;
    }
}

/// Fixed-rate driver pairing a scene with the headless host
#[derive(Debug, Clone)]
pub struct HeadlessRuntime {
    pub scene: PlayScene,
    pub host: HeadlessHost,
    accumulator: f64,
    pending: Vec<InputEvent>,
    reloads: u32,
}

impl HeadlessRuntime {
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Result<Self, TuningError> {
        let mut host = HeadlessHost::new(&tuning);
        let mut scene = PlayScene::new(tuning, settings, seed)?;
        scene.on_create(&mut host);
        Ok(Self {
            scene,
            host,
            accumulator: 0.0,
            pending: Vec::new(),
            reloads: 0,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.scene.phase()
    }

    /// Number of reloads performed so far
    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// Queue an input for the next frame
    pub fn queue_input(&mut self, input: InputEvent) {
        self.pending.push(input);
    }

    /// Run as many whole frames as fit in `dt_ms`. Returns frames run.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if dt_ms > MAX_FRAME_DELTA_MS {
            log::warn!("Frame delta {:.1} ms clamped to {} ms", dt_ms, MAX_FRAME_DELTA_MS);
        }
        self.accumulator += dt_ms.min(MAX_FRAME_DELTA_MS);

        let mut substeps = 0;
        while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
            self.frame();
            self.accumulator -= FRAME_MS;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one frame
    pub fn frame(&mut self) {
        for input in std::mem::take(&mut self.pending) {
            self.scene.handle_input(&mut self.host, input);
        }

        self.host.advance_clock(FRAME_MS);
        let events = self.host.step_physics(FRAME_MS, self.scene.state());
        for event in events {
            match event {
                PhysicsEvent::Collision => self.scene.on_collision(&mut self.host),
                PhysicsEvent::StartTriggerOverlap => {
                    self.scene.on_start_trigger_enter(&mut self.host)
                }
            }
        }

        while let Some(id) = self.host.pop_due_timer() {
            self.scene.on_timer(&mut self.host, id);
        }

        self.scene.on_tick(&mut self.host, FRAME_MS);

        if self.host.take_reload_request() {
            self.reload();
        }
    }

    /// Rebuild host and scene from scratch with the next seed
    pub fn reload(&mut self) {
        let mut scene = self.scene.next_run();
        let mut host = HeadlessHost::new(scene.tuning());
        scene.on_create(&mut host);
        let seed = scene.seed();

        self.scene = scene;
        self.host = host;
        self.accumulator = 0.0;
        self.pending.clear();
        self.reloads += 1;
        log::info!("Reloaded (seed {})", seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime() -> HeadlessRuntime {
        HeadlessRuntime::new(Tuning::default(), Settings::default(), 42).unwrap()
    }

    /// Jump into the trigger and run frames until the run is live
    fn start(rt: &mut HeadlessRuntime) {
        rt.queue_input(InputEvent::Jump);
        for _ in 0..600 {
            rt.frame();
            if rt.phase() == GamePhase::Running {
                return;
            }
        }
        panic!("run never started (phase {:?})", rt.phase());
    }

    #[test]
    fn test_runtime_rejects_invalid_tuning() {
        let tuning = Tuning {
            spawn_distance_min: 900,
            spawn_distance_max: 600,
            ..Default::default()
        };
        assert!(HeadlessRuntime::new(tuning, Settings::default(), 1).is_err());
    }

    #[test]
    fn test_short_runway_lands_after_start() {
        let tuning = Tuning {
            viewport_width: 100.0,
            ..Default::default()
        };
        let mut rt = HeadlessRuntime::new(tuning, Settings::default(), 3).unwrap();
        start(&mut rt);
        assert!(!rt.host.is_grounded());

        for _ in 0..60 {
            rt.frame();
        }
        assert!(rt.host.is_grounded());
        assert_eq!(rt.phase(), GamePhase::Running);
    }

    #[test]
    fn test_create_hides_layers() {
        let rt = runtime();
        assert_eq!(rt.host.environment_alpha, 0.0);
        assert_eq!(rt.host.overlay_alpha, 0.0);
        assert_eq!(rt.host.score_text, "00000");
        assert!(rt.host.timer_active(TimerId::Score));
    }

    #[test]
    fn test_idle_character_stays_in_pregame() {
        let mut rt = runtime();
        for _ in 0..300 {
            rt.frame();
        }
        assert_eq!(rt.phase(), GamePhase::PreGame);
        assert!(rt.host.is_grounded());
        assert_eq!(rt.scene.run_state().score, 0);
    }

    #[test]
    fn test_jump_reaches_trigger_and_starts_run() {
        let mut rt = runtime();
        start(&mut rt);

        let state = rt.scene.state();
        assert!(state.start_trigger.consumed);
        assert_eq!(state.ground.width, 1000.0);
        assert_eq!(state.runway_steps, Tuning::default().runway_steps());
        assert_eq!(rt.host.environment_alpha, 1.0);
        assert!(!rt.host.timer_active(TimerId::Runway));
        // A progression tick may land in the same frame the run starts
        assert!(rt.scene.run_state().score <= 1);
        assert!((rt.scene.run_state().game_speed - 10.0).abs() < 0.02);
        assert_eq!(rt.host.sound_count(SoundEffect::Jump), 1);
    }

    #[test]
    fn test_idle_runner_eventually_crashes() {
        let mut rt = runtime();
        start(&mut rt);
        for _ in 0..60 * 60 {
            rt.frame();
            if rt.phase() == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(rt.phase(), GamePhase::GameOver);
        assert!(rt.host.physics_paused());
        assert!(rt.host.animations_paused);
        assert_eq!(rt.host.overlay_alpha, 1.0);
        assert_eq!(rt.host.texture, (Texture::DinoHurt, 0));
        assert_eq!(rt.host.sound_count(SoundEffect::Hit), 1);

        // Frozen afterwards
        let score = rt.scene.run_state().score;
        for _ in 0..120 {
            rt.frame();
        }
        assert_eq!(rt.scene.run_state().score, score);
        assert_eq!(rt.host.sound_count(SoundEffect::Hit), 1);
    }

    #[test]
    fn test_score_ticks_every_hundred_ms() {
        let mut rt = runtime();
        start(&mut rt);
        let before = rt.scene.run_state().score;
        // 60 frames = 1 second = 10 progression ticks
        for _ in 0..60 {
            rt.frame();
            if rt.phase() != GamePhase::Running {
                return;
            }
        }
        assert_eq!(rt.scene.run_state().score - before, 10);
    }

    #[test]
    fn test_restart_reloads_fresh_scene() {
        let mut rt = runtime();
        start(&mut rt);
        while rt.phase() != GamePhase::GameOver {
            rt.frame();
        }
        rt.queue_input(InputEvent::RestartClicked);
        rt.frame();

        assert_eq!(rt.reloads(), 1);
        assert_eq!(rt.phase(), GamePhase::PreGame);
        assert_eq!(rt.scene.run_state().score, 0);
        assert_eq!(rt.scene.seed(), 43);
        assert!(!rt.host.physics_paused());
    }

    #[test]
    fn test_timer_cancel_stops_firings() {
        let mut host = HeadlessHost::new(&Tuning::default());
        host.start_repeating(TimerId::Runway, 10.0);
        host.advance_clock(35.0);
        assert_eq!(host.pop_due_timer(), Some(TimerId::Runway));
        host.cancel(TimerId::Runway);
        assert_eq!(host.pop_due_timer(), None);
    }

    #[test]
    fn test_timers_fire_in_order() {
        let mut host = HeadlessHost::new(&Tuning::default());
        host.start_repeating(TimerId::Score, 100.0);
        host.start_repeating(TimerId::Runway, 30.0);
        host.advance_clock(100.0);

        let mut fired = Vec::new();
        while let Some(id) = host.pop_due_timer() {
            fired.push(id);
        }
        assert_eq!(
            fired,
            vec![
                TimerId::Runway,
                TimerId::Runway,
                TimerId::Runway,
                TimerId::Score
            ]
        );
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut rt = runtime();
        let frames = rt.advance(1000.0);
        assert!(frames <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = runtime();
        let mut b = runtime();
        start(&mut a);
        start(&mut b);
        for _ in 0..600 {
            a.frame();
            b.frame();
        }
        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.scene.run_state(), b.scene.run_state());
        assert_eq!(a.scene.state().obstacles.len(), b.scene.state().obstacles.len());
    }
}
