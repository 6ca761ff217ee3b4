//! Static rosters for display data.
//!
//! Partner names, the joinable suite directory, and break activities.
//! Sample lists - would come from a directory service in production.

use rand::Rng;

use crate::state::Suite;

/// Default location attached to break suggestions.
pub const BREAK_LOCATION: &str = "Break Room";

static PARTNERS: &[&str] = &[
    "Sarah Chen",
    "Mike Johnson",
    "Alex Rivera",
    "Emily Davis",
    "Jordan Park",
];

/// A canned break activity with a display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakActivity {
    pub name: &'static str,
    pub duration: &'static str,
}

static BREAK_ACTIVITIES: &[BreakActivity] = &[
    BreakActivity {
        name: "Coffee chat",
        duration: "5-10 min",
    },
    BreakActivity {
        name: "Quick walk",
        duration: "10-15 min",
    },
    BreakActivity {
        name: "Mindful break",
        duration: "5 min",
    },
    BreakActivity {
        name: "Social break",
        duration: "15 min",
    },
];

/// Pick a random break partner.
pub fn pick_partner(rng: &mut impl Rng) -> &'static str {
    PARTNERS[rng.gen_range(0..PARTNERS.len())]
}

/// Pick a random break activity.
pub fn pick_activity(rng: &mut impl Rng) -> BreakActivity {
    BREAK_ACTIVITIES[rng.gen_range(0..BREAK_ACTIVITIES.len())]
}

/// The suites available to join, none marked joined.
pub fn suite_directory() -> Vec<Suite> {
    vec![
        Suite::new("1", "Marketing Floor", 8),
        Suite::new("2", "Engineering Wing", 12),
        Suite::new("3", "Sales Team", 6),
        Suite::new("4", "Design Studio", 4),
    ]
}

/// Case-insensitive substring search over the suite directory.
pub fn search_directory(term: &str) -> Vec<Suite> {
    let needle = term.to_lowercase();
    suite_directory()
        .into_iter()
        .filter(|suite| suite.name.to_lowercase().contains(&needle))
        .collect()
}
