//! Demo autopilot
//!
//! Picks an input for the next frame from the visible state, so the headless
//! binary can play a run on its own. Reaction distance scales with speed.

use crate::sim::{BodyProfile, GamePhase, GameState, InputEvent, PhysicsPort};

use super::HeadlessHost;

/// Frames of lead time before an obstacle reaches the character
const REACTION_FRAMES: f32 = 5.0;

/// Choose an input for the next frame, if any
pub fn choose_input(state: &GameState, host: &HeadlessHost) -> Option<InputEvent> {
    match state.phase {
        // Jump into the start trigger
        GamePhase::PreGame if host.is_grounded() => Some(InputEvent::Jump),
        GamePhase::Running => react(state, host),
        _ => None,
    }
}

fn react(state: &GameState, host: &HeadlessHost) -> Option<InputEvent> {
    // Still rising from the last jump; nothing would be accepted
    if state.character.vertical_velocity < 0.0 {
        return None;
    }

    let me = host.character_bounds();
    let ducking = state.character.body == BodyProfile::Ducking;
    let lookahead = state.run.game_speed * REACTION_FRAMES + 10.0;

    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.right() > me.left())
        .filter(|o| o.x - me.right() <= lookahead)
        .min_by(|a, b| a.x.total_cmp(&b.x));

    let Some(threat) = threat else {
        return ducking.then_some(InputEvent::DuckReleased);
    };

    // High birds pass over a crouching body
    let crouch = BodyProfile::Ducking.bounds(me.left(), state.viewport.height);
    if threat.kind.is_aerial() && threat.body().bottom() <= crouch.top() {
        return (!ducking).then_some(InputEvent::DuckPressed);
    }

    if ducking {
        Some(InputEvent::DuckReleased)
    } else {
        Some(InputEvent::Jump)
    }
}
