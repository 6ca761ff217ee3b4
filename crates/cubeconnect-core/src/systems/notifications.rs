//! Notification queue and wellness toast emission.
//!
//! Toasts live in an append-only queue, are removed by id, and auto-expire
//! a fixed time after creation unless dismissed first. Emission during the
//! decay tick is probability-gated and fully driven by the caller's RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::roster::{pick_partner, BREAK_LOCATION};
use crate::state::Settings;
use crate::wellness::{DROWSY_THRESHOLD, NEEDS_BREAK_THRESHOLD, NOTIFY_CHANCE};

/// Seconds a toast stays up before auto-expiring.
pub const TOAST_TTL: f64 = 10.0;

/// What a toast is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Personal score dropped below the drowsiness threshold.
    Drowsiness,
    /// Personal score is low but above the drowsiness threshold.
    Distraction,
    /// A break just completed.
    BreakComplete,
}

impl NotificationKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Drowsiness => "You look sleepy!",
            Self::Distraction => "Having trouble focusing?",
            Self::BreakComplete => "Great break!",
        }
    }

    /// Whether the toast offers a take-break action.
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::Drowsiness | Self::Distraction)
    }
}

/// A transient, dismissible message. Partner and location are display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub partner: Option<String>,
    pub location: Option<String>,
    pub created_at: f64,
}

/// Append-only toast queue with removal by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationQueue {
    toasts: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast and return its id.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        body: String,
        partner: Option<String>,
        location: Option<String>,
        now: f64,
    ) -> String {
        self.next_id += 1;
        let id = format!("n{}", self.next_id);
        self.toasts.push(Notification {
            id: id.clone(),
            kind,
            title: kind.title().to_string(),
            body,
            partner,
            location,
            created_at: now,
        });
        id
    }

    /// Remove exactly the toast with this id. Returns whether it was
    /// present.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() < before
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Toasts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Roll for a wellness toast on a decay tick.
///
/// Emits with probability [`NOTIFY_CHANCE`] when the personal score is below
/// the break threshold and both the notifications and drowsiness-monitoring
/// flags are on. Returns the new toast's id if one was emitted.
pub fn maybe_emit_wellness_toast(
    queue: &mut NotificationQueue,
    personal: f32,
    settings: &Settings,
    now: f64,
    rng: &mut impl Rng,
) -> Option<String> {
    if personal >= NEEDS_BREAK_THRESHOLD
        || !settings.notifications
        || !settings.drowsiness_monitoring
    {
        return None;
    }
    if !rng.gen_bool(NOTIFY_CHANCE) {
        return None;
    }

    let partner = pick_partner(rng);
    let (kind, body) = if personal < DROWSY_THRESHOLD {
        (
            NotificationKind::Drowsiness,
            format!("Time for a 5-minute break with {}?", partner),
        )
    } else {
        (
            NotificationKind::Distraction,
            format!("Coffee break with {}?", partner),
        )
    };

    let id = queue.push(
        kind,
        body,
        Some(partner.to_string()),
        Some(BREAK_LOCATION.to_string()),
        now,
    );
    log::debug!("emitted {:?} toast {}", kind, id);
    Some(id)
}
