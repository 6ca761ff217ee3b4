//! Decay system - erodes the personal score and drifts the team score.

use rand::Rng;

use crate::state::WellnessState;
use crate::wellness::{clamp_score, DECAY_FLOOR, MAX_DECAY_PER_TICK, TEAM_DRIFT_SPAN};

/// Seconds between decay ticks.
pub const DECAY_INTERVAL: f64 = 30.0;

/// Apply one decay tick to the wellness scores.
///
/// The personal score loses a draw from `[0, 3)` but never drops below the
/// decay floor; scores already at or below the floor are left alone. The
/// team score drifts by a draw from `[-2, 2)`, clamped to [0, 100].
pub fn decay_tick(state: &mut WellnessState, rng: &mut impl Rng) {
    if state.personal > DECAY_FLOOR {
        let draw = rng.gen_range(0.0..MAX_DECAY_PER_TICK);
        state.personal = (state.personal - draw).max(DECAY_FLOOR);
    }

    let drift = rng.gen_range(-TEAM_DRIFT_SPAN..TEAM_DRIFT_SPAN);
    state.team = clamp_score(state.team + drift);
}
