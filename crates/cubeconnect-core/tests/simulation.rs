//! Integration tests for a full dashboard session.
//!
//! Exercises: startup restore -> decay ticks -> toast emission/expiry ->
//! break actions -> suite lifecycle -> snapshot save/load, all on seeded
//! RNGs with no wall-clock timers.

use cubeconnect_core::prelude::*;
use cubeconnect_core::store::{FileSuiteStore, MemorySuiteStore, SuiteStore};
use cubeconnect_core::systems::TOAST_TTL;
use cubeconnect_core::wellness::{DECAY_FLOOR, NEEDS_BREAK_THRESHOLD};

/// Drive a seeded session for an hour and check the standing invariants
/// after every tick's worth of advancement.
#[test]
fn hour_long_session_upholds_invariants() {
    let mut sim = WellnessSimulator::with_seed(2024);

    let mut step = 0;
    while sim.sim_time() < 3600.0 {
        sim.advance(30.0);
        step += 1;

        // Take a break every ten minutes to push the score around.
        if step % 20 == 0 {
            sim.take_break(None);
        }

        let wellness = sim.wellness();
        assert!((0.0..=100.0).contains(&wellness.personal));
        assert!((0.0..=100.0).contains(&wellness.team));

        // Any surviving toast is younger than the TTL.
        for toast in sim.notifications() {
            assert!(sim.sim_time() - toast.created_at <= TOAST_TTL);
        }
    }
}

#[test]
fn decay_only_session_floors_at_thirty() {
    let mut sim = WellnessSimulator::with_seed(7);

    // Two hours of nothing but decay.
    sim.advance_to(7200.0);

    let personal = sim.wellness().personal;
    assert!(personal >= DECAY_FLOOR);
    assert!(personal <= 75.0);
    // 240 ticks is far past the worst-case descent from 75 to the floor.
    assert_eq!(personal, DECAY_FLOOR);
    assert!(sim.needs_break());
    assert_eq!(sim.band(), WellnessBand::NeedsAttention);
}

#[test]
fn toasts_emitted_by_decay_expire_within_ttl() {
    let mut sim = WellnessSimulator::with_seed(55);

    // Let the score fall below the emission gate, then watch toasts churn.
    sim.advance_to(7200.0);
    assert!(sim.wellness().personal < NEEDS_BREAK_THRESHOLD);

    let mut saw_a_toast = false;
    while sim.sim_time() < 7200.0 + 3600.0 {
        sim.advance(1.0);
        if sim.notification_count() > 0 {
            saw_a_toast = true;
        }
        for toast in sim.notifications() {
            assert!(toast.kind.is_actionable());
            assert!(sim.sim_time() - toast.created_at <= TOAST_TTL);
        }
    }
    // 120 gated ticks at 30% each: a silent hour is effectively impossible.
    assert!(saw_a_toast);
}

#[test]
fn taking_break_from_a_toast_clears_it_and_reports_success() {
    let mut sim = WellnessSimulator::with_seed(55);
    sim.advance_to(7200.0);

    // Find an emitted toast, then accept the break it suggests.
    let mut toast_id = None;
    for _ in 0..1000 {
        sim.advance(30.0);
        if let Some(toast) = sim.notifications().next() {
            toast_id = Some(toast.id.clone());
            break;
        }
    }
    let toast_id = toast_id.expect("no toast emitted in 1000 gated ticks");

    let before = sim.wellness().personal;
    sim.take_break(Some(&toast_id));
    // The commit lands between decay ticks, so the recovery is exact.
    sim.advance(1.0);

    assert!(sim.notifications().all(|t| t.id != toast_id));
    assert!(sim
        .notifications()
        .any(|t| t.kind == NotificationKind::BreakComplete));
    assert_eq!(sim.wellness().personal, (before + 25.0).min(100.0));
}

#[test]
fn suite_survives_restart_via_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileSuiteStore::new(dir.path());

    {
        let mut sim = WellnessSimulator::with_seed(1);
        sim.join_suite(Suite::new("2", "Engineering Wing", 12), &mut store)
            .unwrap();
    }

    // Next session reads the record back and skips onboarding.
    let mut sim = WellnessSimulator::with_seed(2);
    sim.load_suite(&store).unwrap();
    assert!(!sim.needs_onboarding());
    let suite = sim.suite().unwrap();
    assert_eq!(suite.name, "Engineering Wing");
    assert!(suite.joined);

    sim.leave_suite(&mut store).unwrap();
    assert!(sim.needs_onboarding());
    assert!(store.load().unwrap().is_none());
}

#[test]
fn corrupt_record_on_disk_restarts_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSuiteStore::new(dir.path());
    std::fs::write(store.path(), "][ definitely not a suite").unwrap();

    let mut sim = WellnessSimulator::with_seed(3);
    sim.load_suite(&store).unwrap();
    assert!(sim.needs_onboarding());
}

#[test]
fn snapshot_resumes_mid_session() {
    let mut store = MemorySuiteStore::new();
    let mut sim = WellnessSimulator::with_seed(77);
    sim.join_suite(Suite::new("1", "Marketing Floor", 8), &mut store)
        .unwrap();
    sim.advance(600.0);
    sim.take_break(None);

    // Snapshot while the break commit is still pending.
    let mut buffer = Vec::new();
    sim.save(&mut buffer).unwrap();

    let mut restored = WellnessSimulator::load(&buffer[..]).unwrap();
    assert_eq!(restored.sim_time(), 600.0);
    let before = restored.wellness().personal;

    // The pending commit fires in the restored session too.
    restored.advance(1.0);
    assert!(restored.wellness().personal >= before);
    assert_eq!(restored.wellness().last_break_at, 601.0);
}
