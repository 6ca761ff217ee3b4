//! CubeConnect Core - workplace wellness dashboard simulation engine.
//!
//! A deterministic, single-threaded state machine behind the CubeConnect
//! dashboard: simulated wellness scores that decay on a fixed tick,
//! probability-gated notification toasts with auto-expiry, break actions
//! with a simulated connect delay, and suite membership persisted under a
//! single key. Views consume plain data and feed actions back in; nothing
//! here renders.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`state`] | Plain data: wellness scores, settings toggles, suite record |
//! | [`wellness`] | Pure score logic: bands, mood, privacy level, derived meters |
//! | [`roster`] | Static partner/suite/activity rosters and random picks |
//! | [`scheduler`] | Min-heap timer queue driving every delayed effect |
//! | [`systems`] | Decay tick, notification queue and emission, break commit |
//! | [`engine`] | [`WellnessSimulator`]: owns all state, public API |
//! | [`store`] | Suite record persistence (file-backed and in-memory) |
//! | [`persistence`] | Versioned binary session snapshots |
//!
//! # Example
//!
//! ```rust
//! use cubeconnect_core::prelude::*;
//! use cubeconnect_core::store::MemorySuiteStore;
//!
//! let mut store = MemorySuiteStore::new();
//! let mut sim = WellnessSimulator::with_seed(42);
//!
//! sim.create_suite("Engineering Wing", &mut store).unwrap();
//! sim.advance(300.0); // five minutes of decay ticks
//! sim.take_break(None);
//! sim.advance(1.0); // connect delay elapses, break commits
//!
//! assert!(!sim.needs_onboarding());
//! ```
//!
//! [`WellnessSimulator`]: engine::WellnessSimulator

pub mod engine;
pub mod persistence;
pub mod roster;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod systems;
pub mod wellness;

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::engine::WellnessSimulator;
    pub use crate::state::{Settings, Suite, WellnessState};
    pub use crate::systems::{Notification, NotificationKind};
    pub use crate::wellness::{MascotMood, PrivacyLevel, WellnessBand};
}
