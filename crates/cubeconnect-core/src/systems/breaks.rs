//! Break system - committing breaks and generating suggestions.

use rand::Rng;

use crate::roster::{pick_activity, pick_partner, BREAK_LOCATION};
use crate::state::WellnessState;
use crate::wellness::{clamp_score, BREAK_RECOVERY};

/// Seconds of simulated connect latency before a break commits.
pub const BREAK_CONNECT_DELAY: f64 = 1.0;

/// Apply a committed break: recover the personal score and record the time.
pub fn commit_break(state: &mut WellnessState, now: f64) {
    state.personal = clamp_score(state.personal + BREAK_RECOVERY);
    state.last_break_at = now;
}

/// Display data for a break proposal: who, what, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakSuggestion {
    pub partner: &'static str,
    pub activity: &'static str,
    pub duration: &'static str,
    pub location: &'static str,
}

/// Draw a break suggestion from the rosters.
pub fn suggest_break(rng: &mut impl Rng) -> BreakSuggestion {
    let activity = pick_activity(rng);
    BreakSuggestion {
        partner: pick_partner(rng),
        activity: activity.name,
        duration: activity.duration,
        location: BREAK_LOCATION,
    }
}
