//! Pure wellness score logic.
//!
//! Score bands, mascot mood, privacy levels, derived meters, and the
//! numeric constants the decay and break systems share - all as pure
//! functions over plain numbers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::state::Settings;

pub const SCORE_MIN: f32 = 0.0;
pub const SCORE_MAX: f32 = 100.0;

/// Decay never drags the personal score below this floor.
pub const DECAY_FLOOR: f32 = 30.0;

/// Largest per-tick personal decay draw (exclusive).
pub const MAX_DECAY_PER_TICK: f32 = 3.0;

/// Half-width of the per-tick team drift range.
pub const TEAM_DRIFT_SPAN: f32 = 2.0;

/// Score gained by completing a break.
pub const BREAK_RECOVERY: f32 = 25.0;

/// Below this score the user is due for a break and eligible for toasts.
pub const NEEDS_BREAK_THRESHOLD: f32 = 60.0;

/// Below this score an emitted toast reports drowsiness rather than
/// distraction.
pub const DROWSY_THRESHOLD: f32 = 40.0;

/// Per-tick probability of emitting a toast while below the break
/// threshold.
pub const NOTIFY_CHANCE: f64 = 0.3;

/// Clamp a score into [0, 100].
pub fn clamp_score(value: f32) -> f32 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

/// Whether the personal score calls for a break suggestion.
pub fn needs_break(personal: f32) -> bool {
    personal < NEEDS_BREAK_THRESHOLD
}

/// Display bands for a personal wellness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WellnessBand {
    /// Score >= 80.
    Excellent,
    /// Score 65..80.
    Good,
    /// Score 45..65.
    Fair,
    /// Score < 45.
    NeedsAttention,
}

impl WellnessBand {
    pub fn from_score(score: f32) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 65.0 {
            Self::Good
        } else if score >= 45.0 {
            Self::Fair
        } else {
            Self::NeedsAttention
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

/// Team mascot mood, driven by the team score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MascotMood {
    /// Team score >= 75.
    Happy,
    /// Team score 50..75.
    Neutral,
    /// Team score < 50.
    Sleepy,
}

impl MascotMood {
    pub fn from_team_score(score: f32) -> Self {
        if score >= 75.0 {
            Self::Happy
        } else if score >= 50.0 {
            Self::Neutral
        } else {
            Self::Sleepy
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Happy => "Team is thriving! I'm feeling energetic!",
            Self::Neutral => "Team wellness is stable. Keep it up!",
            Self::Sleepy => "Team needs more breaks. I'm feeling sleepy...",
        }
    }
}

/// Privacy posture derived from how many settings are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivacyLevel {
    /// >= 80% of toggles on.
    Open,
    /// >= 60% on.
    Balanced,
    /// >= 40% on.
    Private,
    /// Fewer than 40% on.
    VeryPrivate,
}

impl PrivacyLevel {
    pub fn from_settings(settings: &Settings) -> Self {
        let fraction = settings.enabled_count() as f32 / Settings::COUNT as f32;
        if fraction >= 0.8 {
            Self::Open
        } else if fraction >= 0.6 {
            Self::Balanced
        } else if fraction >= 0.4 {
            Self::Private
        } else {
            Self::VeryPrivate
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Balanced => "Balanced",
            Self::Private => "Private",
            Self::VeryPrivate => "Very Private",
        }
    }
}

/// Focus meter: wellness plus up to +-10 of jitter, clamped.
pub fn focus_level(personal: f32, rng: &mut impl Rng) -> f32 {
    clamp_score(personal + rng.gen_range(-10.0..10.0))
}

/// Energy meter: wellness minus 5 plus up to +-7.5 of jitter, clamped.
pub fn energy_level(personal: f32, rng: &mut impl Rng) -> f32 {
    clamp_score(personal - 5.0 + rng.gen_range(-7.5..7.5))
}

/// Human-readable "time since last break" string: "2h 15m ago" or
/// "45m ago".
pub fn format_time_since_break(now: f64, last_break_at: f64) -> String {
    let elapsed = (now - last_break_at).max(0.0) as u64;
    let hours = elapsed / 3600;
    let minutes = (elapsed % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m ago", hours, minutes)
    } else {
        format!("{}m ago", minutes)
    }
}
