//! Core state held by the simulator.
//!
//! These are pure data structs - all behavior lives in systems and the engine.

use serde::{Deserialize, Serialize};

use crate::wellness::clamp_score;

/// How long before session start the initial break is backdated (seconds).
const INITIAL_BREAK_AGE: f64 = 2.0 * 60.0 * 60.0;

/// Wellness scores - both values 0.0 (depleted) to 100.0 (thriving).
///
/// Both scores are clamped to [0, 100] on every write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessState {
    pub personal: f32,
    pub team: f32,
    /// Sim time (seconds) of the most recent completed break.
    pub last_break_at: f64,
}

impl WellnessState {
    /// Set the personal score, clamped to the valid range.
    pub fn set_personal(&mut self, value: f32) {
        self.personal = clamp_score(value);
    }

    /// Set the team score, clamped to the valid range.
    pub fn set_team(&mut self, value: f32) {
        self.team = clamp_score(value);
    }

    /// Seconds elapsed since the last completed break, never negative.
    pub fn seconds_since_break(&self, now: f64) -> f64 {
        (now - self.last_break_at).max(0.0)
    }
}

impl Default for WellnessState {
    fn default() -> Self {
        Self {
            personal: 75.0,
            team: 67.0,
            last_break_at: -INITIAL_BREAK_AGE,
        }
    }
}

/// The five privacy/feature toggles.
///
/// Sound only takes effect while notifications are enabled; that gating is
/// a display concern, so both flags are stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub drowsiness_monitoring: bool,
    pub break_pairing: bool,
    pub availability_sharing: bool,
    pub notifications: bool,
    pub sound: bool,
}

impl Settings {
    /// Total number of toggles.
    pub const COUNT: usize = 5;

    /// How many toggles are currently on.
    pub fn enabled_count(&self) -> usize {
        [
            self.drowsiness_monitoring,
            self.break_pairing,
            self.availability_sharing,
            self.notifications,
            self.sound,
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }

    /// Whether sound should actually play right now.
    pub fn sound_effective(&self) -> bool {
        self.notifications && self.sound
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            drowsiness_monitoring: true,
            break_pairing: true,
            availability_sharing: true,
            notifications: true,
            sound: false,
        }
    }
}

/// A named group the user belongs to. At most one suite is current per
/// session; the record round-trips through the persisted key as camelCase
/// JSON (`{id, name, memberCount, isJoined}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    pub id: String,
    pub name: String,
    pub member_count: u32,
    #[serde(rename = "isJoined")]
    pub joined: bool,
}

impl Suite {
    pub fn new(id: impl Into<String>, name: impl Into<String>, member_count: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            member_count,
            joined: false,
        }
    }
}
