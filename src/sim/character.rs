//! Character controller
//!
//! Input transitions are only honoured while physics reports the character on
//! the ground. The animation shown each frame is derived from physical motion,
//! not from the last input, because gravity decides when the character lands.

use super::host::{AnimationClip, Host, PhysicsPort, Texture};
use super::state::{AnimationState, BodyProfile, Character};
use crate::audio::SoundEffect;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Jump if grounded. Returns whether the impulse was applied.
pub fn jump<H: Host>(
    character: &mut Character,
    host: &mut H,
    tuning: &Tuning,
    settings: &Settings,
) -> bool {
    if character.is_hurt() || !host.is_grounded() {
        return false;
    }

    set_body(character, host, BodyProfile::Standing);
    host.set_character_texture(Texture::Dino, 0);
    host.set_character_velocity_y(-tuning.jump_impulse);
    host.play_sound(
        SoundEffect::Jump,
        settings.effective_volume(SoundEffect::Jump.base_volume()),
    );
    character.grounded = false;
    character.vertical_velocity = -tuning.jump_impulse;
    true
}

/// Shrink the body to the crouch profile if grounded
pub fn duck_press<H: Host>(character: &mut Character, host: &mut H) -> bool {
    if character.is_hurt() || !host.is_grounded() {
        return false;
    }
    set_body(character, host, BodyProfile::Ducking);
    true
}

/// Restore the standing body if grounded
pub fn duck_release<H: Host>(character: &mut Character, host: &mut H) -> bool {
    if character.is_hurt() || !host.is_grounded() {
        return false;
    }
    set_body(character, host, BodyProfile::Standing);
    true
}

fn set_body<H: Host>(character: &mut Character, host: &mut H, body: BodyProfile) {
    character.body = body;
    host.set_character_body(body);
}

/// Pull grounded / velocity feedback from physics
pub fn sync_physics<P: PhysicsPort>(character: &mut Character, physics: &P) {
    if character.is_hurt() {
        return;
    }
    character.grounded = physics.is_grounded();
    character.vertical_velocity = physics.vertical_velocity();
}

/// Pick the animation for the current physical state
pub fn derive_animation(character: &Character, vertical_delta: f32) -> AnimationState {
    if character.is_hurt() {
        AnimationState::Hurt
    } else if vertical_delta.abs() > 0.0 {
        AnimationState::Idle
    } else if character.body == BodyProfile::Ducking {
        AnimationState::Ducking
    } else {
        AnimationState::Running
    }
}

/// Derive and apply the animation for this frame; only changes reach the host
pub fn update_animation<H: Host>(character: &mut Character, host: &mut H) {
    let next = derive_animation(character, host.vertical_delta());
    if next == character.animation {
        return;
    }

    match next {
        AnimationState::Idle => {
            host.stop_character_animation();
            host.set_character_texture(Texture::Dino, 0);
        }
        AnimationState::Ducking => host.play_character_clip(AnimationClip::DinoDown),
        AnimationState::Running => host.play_character_clip(AnimationClip::DinoRun),
        // Only collision sets Hurt
        AnimationState::Hurt => return,
    }
    character.animation = next;
}
