//! Score and difficulty progression
//!
//! Driven by its own repeating timer, not by the frame tick. A firing while
//! the run is not active does nothing, so pausing never builds a backlog.

use super::host::{Host, ScoreFlash};
use super::state::RunState;
use crate::audio::SoundEffect;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Minimum digits shown by the score display
pub const SCORE_DIGITS: usize = 5;

/// What a single progression tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTick {
    pub score: u32,
    /// Minor milestone reached (sound + flash)
    pub milestone: bool,
    /// Major milestone reached (roar)
    pub roar: bool,
}

/// Zero-pad to 5 digits; larger scores keep every digit
pub fn format_score(score: u32) -> String {
    format!("{:0width$}", score, width = SCORE_DIGITS)
}

/// `score` is a positive multiple of `interval`
pub fn is_multiple(score: u32, interval: u32) -> bool {
    interval > 0 && score > 0 && score.is_multiple_of(interval)
}

/// Advance score and speed by one step. `None` while not running.
pub fn advance(run: &mut RunState, tuning: &Tuning) -> Option<ScoreTick> {
    if !run.is_running {
        return None;
    }

    run.score = run.score.saturating_add(1);
    run.game_speed = (run.game_speed + tuning.speed_increment).max(0.0);

    Some(ScoreTick {
        score: run.score,
        milestone: is_multiple(run.score, tuning.milestone_interval),
        roar: is_multiple(run.score, tuning.roar_interval),
    })
}

/// Advance and emit the audio / HUD feedback for this step
pub fn on_score_tick<H: Host>(
    run: &mut RunState,
    host: &mut H,
    tuning: &Tuning,
    settings: &Settings,
) -> Option<ScoreTick> {
    let tick = advance(run, tuning)?;

    if tick.milestone {
        host.play_sound(
            SoundEffect::Reach,
            settings.effective_volume(SoundEffect::Reach.base_volume()),
        );
        host.flash_score(ScoreFlash::default());
    }
    if tick.roar {
        log::info!("Score {} reached", tick.score);
        host.play_sound(
            SoundEffect::TrexRoar,
            settings.effective_volume(SoundEffect::TrexRoar.base_volume()),
        );
    }

    host.set_score_text(&format_score(tick.score));
    Some(tick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::host::recording::RecordingHost;
    use proptest::prelude::*;

    fn running() -> RunState {
        RunState {
            is_running: true,
            ..RunState::new(10.0)
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "00000");
        assert_eq!(format_score(7), "00007");
        assert_eq!(format_score(99999), "99999");
        assert_eq!(format_score(123456), "123456");
    }

    #[test]
    fn test_no_progress_while_stopped() {
        let tuning = Tuning::default();
        let mut run = RunState::new(10.0);
        let mut host = RecordingHost::default();
        for _ in 0..1000 {
            assert!(on_score_tick(&mut run, &mut host, &tuning, &Settings::default()).is_none());
        }
        assert_eq!(run.score, 0);
        assert_eq!(run.game_speed, 10.0);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_speed_ramps_with_score() {
        let tuning = Tuning::default();
        let mut run = running();
        for _ in 0..100 {
            advance(&mut run, &tuning);
        }
        assert_eq!(run.score, 100);
        assert!((run.game_speed - 11.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_never_negative() {
        let tuning = Tuning {
            speed_increment: -1.0,
            ..Default::default()
        };
        let mut run = running();
        for _ in 0..20 {
            advance(&mut run, &tuning);
            assert!(run.game_speed >= 0.0, "speed went to {}", run.game_speed);
        }
        assert_eq!(run.game_speed, 0.0);
        assert_eq!(run.score, 20);
    }

    #[test]
    fn test_milestones() {
        let tuning = Tuning::default();
        let settings = Settings::default();
        let mut run = running();
        let mut host = RecordingHost::default();

        for _ in 0..1000 {
            on_score_tick(&mut run, &mut host, &tuning, &settings);
        }
        assert_eq!(host.sounds(SoundEffect::Reach), 10);
        assert_eq!(host.flashes(), 10);
        assert_eq!(host.sounds(SoundEffect::TrexRoar), 2);
        assert_eq!(host.last_score_text(), Some("01000"));
    }

    proptest! {
        #[test]
        fn prop_score_text_at_least_five_digits(score in any::<u32>()) {
            let text = format_score(score);
            prop_assert!(text.len() >= SCORE_DIGITS);
            prop_assert!(text.chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(text.parse::<u32>().unwrap(), score);
            if score < 100_000 {
                prop_assert_eq!(text.len(), SCORE_DIGITS);
            }
        }

        #[test]
        fn prop_milestone_flags(score in 0u32..100_000) {
            prop_assert_eq!(is_multiple(score, 100), score > 0 && score % 100 == 0);
            prop_assert_eq!(is_multiple(score, 500), score > 0 && score % 500 == 0);
        }
    }
}
