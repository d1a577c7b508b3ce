//! Game loop controller
//!
//! `PlayScene` owns the run state and reacts to host callbacks: frame ticks,
//! timer firings, physics events and player input. The engine adapter is
//! passed into every handler, so the scene never stores it.

use super::character;
use super::environment;
use super::host::{AnimationClip, Host, InputEvent, Layer, Texture, TimerId};
use super::progression::{self, ScoreTick};
use super::spawner::{ObstacleSpawner, cleanup_offscreen};
use super::state::{AnimationState, GamePhase, GameState, RunState};
use crate::audio::SoundEffect;
use crate::settings::Settings;
use crate::tuning::{Tuning, TuningError};

/// The playable scene
#[derive(Debug, Clone)]
pub struct PlayScene {
    tuning: Tuning,
    settings: Settings,
    state: GameState,
    spawner: ObstacleSpawner,
    seed: u64,
}

impl PlayScene {
    /// Build a scene, rejecting tuning the simulation cannot run with
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, settings, seed))
    }

    fn build(tuning: Tuning, settings: Settings, seed: u64) -> Self {
        let state = GameState::new(&tuning);
        Self {
            tuning,
            settings,
            state,
            spawner: ObstacleSpawner::new(seed),
            seed,
        }
    }

    /// Fresh scene for the next run, same tuning, next seed
    pub fn next_run(&self) -> Self {
        Self::build(
            self.tuning.clone(),
            self.settings.clone(),
            self.seed.wrapping_add(1),
        )
    }

    /// Read-only snapshot of everything the host draws
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run_state(&self) -> &RunState {
        &self.state.run
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current score display text
    pub fn score_text(&self) -> String {
        progression::format_score(self.state.run.score)
    }

    /// Configure the host for a fresh pre-game world
    pub fn on_create<H: Host>(&mut self, host: &mut H) {
        host.set_character_gravity(self.tuning.gravity);
        host.set_character_body(self.state.character.body);
        host.set_character_texture(Texture::DinoIdle, 0);
        host.set_layer_alpha(Layer::Environment, 0.0);
        host.set_layer_alpha(Layer::GameOverOverlay, 0.0);
        host.set_score_text(&self.score_text());
        host.start_repeating(TimerId::Score, self.tuning.score_tick_ms);
        log::info!(
            "Scene created ({}x{}, seed {})",
            self.tuning.viewport_width,
            self.tuning.viewport_height,
            self.seed
        );
    }

    /// Advance one frame. `delta_ms` is the host frame time.
    pub fn on_tick<H: Host>(&mut self, host: &mut H, delta_ms: f64) {
        self.state.frame += 1;
        if self.state.phase != GamePhase::Running {
            return;
        }

        let speed = self.state.run.game_speed;
        environment::scroll_ground(&mut self.state.ground, speed);
        for obstacle in &mut self.state.obstacles {
            obstacle.x -= speed;
        }
        environment::scroll_clouds(&mut self.state.clouds, self.tuning.cloud_scroll_speed);

        self.state.run.respawn_accumulator +=
            delta_ms as f32 * speed * self.tuning.respawn_scale;
        if self.state.run.respawn_accumulator >= self.tuning.spawn_threshold {
            self.place_obstacle();
            self.state.run.respawn_accumulator = 0.0;
        }

        cleanup_offscreen(&mut self.state.obstacles);
        environment::recycle_clouds(
            &mut self.state.clouds,
            self.tuning.viewport_width,
            self.tuning.cloud_recycle_margin,
        );

        character::sync_physics(&mut self.state.character, &*host);
        character::update_animation(&mut self.state.character, host);

        self.state.normalize_order();
    }

    /// Spawn one obstacle ahead of the viewport
    pub fn place_obstacle(&mut self) {
        let obstacle = self
            .spawner
            .place_obstacle(&self.state.viewport, &self.tuning);
        self.state.obstacles.push(obstacle);
    }

    /// Physics reported the character touching an obstacle
    pub fn on_collision<H: Host>(&mut self, host: &mut H) {
        if self.state.phase != GamePhase::Running {
            return;
        }

        host.pause_physics();
        self.state.run.is_running = false;
        host.pause_all_animations();
        host.set_character_texture(Texture::DinoHurt, 0);
        self.state.character.animation = AnimationState::Hurt;
        self.state.run.respawn_accumulator = 0.0;
        self.state.run.game_speed = 0.0;
        host.set_layer_alpha(Layer::GameOverOverlay, 1.0);
        host.play_sound(
            SoundEffect::Hit,
            self.settings
                .effective_volume(SoundEffect::Hit.base_volume()),
        );
        self.state.phase = GamePhase::GameOver;
        log::info!("Game over at score {}", self.state.run.score);
    }

    /// Character entered the start trigger region
    pub fn on_start_trigger_enter<H: Host>(&mut self, host: &mut H) {
        if self.state.phase != GamePhase::PreGame || self.state.start_trigger.consumed {
            return;
        }

        self.state.start_trigger.consumed = true;
        self.state.phase = GamePhase::Starting;
        host.start_repeating(TimerId::Runway, self.tuning.runway_period_ms());
        log::info!("Start trigger hit, extending runway");
    }

    /// One fixed-rate step of the start sequence
    pub fn on_runway_step<H: Host>(&mut self, host: &mut H) {
        if self.state.phase != GamePhase::Starting {
            return;
        }

        self.state.runway_steps += 1;
        host.set_character_velocity_x(self.tuning.runway_run_velocity);
        host.play_character_clip(AnimationClip::DinoRun);
        self.state.character.animation = AnimationState::Running;

        let complete = environment::extend_runway(
            &mut self.state.ground,
            self.tuning.viewport_width,
            self.tuning.runway_increment,
        );
        if complete {
            host.cancel(TimerId::Runway);
            self.state.run.is_running = true;
            host.set_character_velocity_x(0.0);
            // A short runway can finish mid-jump; let gravity land it
            if host.is_grounded() {
                host.set_character_velocity_y(0.0);
            }
            host.set_layer_alpha(Layer::Environment, 1.0);
            self.state.phase = GamePhase::Running;
            log::info!("Run started after {} runway steps", self.state.runway_steps);
        }
    }

    /// One progression timer firing
    pub fn on_score_tick<H: Host>(&mut self, host: &mut H) -> Option<ScoreTick> {
        progression::on_score_tick(&mut self.state.run, host, &self.tuning, &self.settings)
    }

    pub fn on_jump_input<H: Host>(&mut self, host: &mut H) -> bool {
        if self.state.phase == GamePhase::GameOver {
            return false;
        }
        character::jump(&mut self.state.character, host, &self.tuning, &self.settings)
    }

    pub fn on_duck_press<H: Host>(&mut self, host: &mut H) -> bool {
        if self.state.phase == GamePhase::GameOver {
            return false;
        }
        character::duck_press(&mut self.state.character, host)
    }

    pub fn on_duck_release<H: Host>(&mut self, host: &mut H) -> bool {
        if self.state.phase == GamePhase::GameOver {
            return false;
        }
        character::duck_release(&mut self.state.character, host)
    }

    /// Restart button clicked; only live while the game-over overlay shows
    pub fn on_restart_pressed<H: Host>(&mut self, host: &mut H) -> bool {
        if self.state.phase != GamePhase::GameOver {
            return false;
        }
        log::info!("Restart requested");
        host.request_reload();
        true
    }

    /// Dispatch a player input
    pub fn handle_input<H: Host>(&mut self, host: &mut H, input: InputEvent) -> bool {
        match input {
            InputEvent::Jump => self.on_jump_input(host),
            InputEvent::DuckPressed => self.on_duck_press(host),
            InputEvent::DuckReleased => self.on_duck_release(host),
            InputEvent::RestartClicked => self.on_restart_pressed(host),
        }
    }

    /// Dispatch a timer firing
    pub fn on_timer<H: Host>(&mut self, host: &mut H, id: TimerId) {
        match id {
            TimerId::Score => {
                self.on_score_tick(host);
            }
            TimerId::Runway => self.on_runway_step(host),
        }
    }
}
