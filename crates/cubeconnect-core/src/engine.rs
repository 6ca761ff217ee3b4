//! Simulation engine - main entry point for driving the dashboard state.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::persistence::{self, Snapshot, SnapshotError, SNAPSHOT_VERSION};
use crate::scheduler::{Scheduler, TimerKind};
use crate::state::{Settings, Suite, WellnessState};
use crate::store::{StoreError, SuiteStore};
use crate::systems::{
    commit_break, decay_tick, maybe_emit_wellness_toast, suggest_break, BreakSuggestion,
    Notification, NotificationKind, NotificationQueue, BREAK_CONNECT_DELAY, DECAY_INTERVAL,
    TOAST_TTL,
};
use crate::wellness::{
    self, format_time_since_break, MascotMood, PrivacyLevel, WellnessBand,
};

/// Owns all dashboard state and advances it on a simulated clock.
///
/// Time is an `f64` in seconds from session start. All delayed effects run
/// through one timer queue, so a session driven with the same seed and the
/// same action sequence replays identically. Dropping the simulator drops
/// every pending timer with it.
pub struct WellnessSimulator {
    state: WellnessState,
    settings: Settings,
    suite: Option<Suite>,
    queue: NotificationQueue,
    scheduler: Scheduler,
    sim_time: f64,
    seed: u64,
    next_suite_id: u64,
    rng: StdRng,
}

impl WellnessSimulator {
    /// Create a simulator with an entropy-derived seed.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a simulator with a fixed seed, for deterministic runs.
    pub fn with_seed(seed: u64) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(DECAY_INTERVAL, TimerKind::DecayTick);

        Self {
            state: WellnessState::default(),
            settings: Settings::default(),
            suite: None,
            queue: NotificationQueue::new(),
            scheduler,
            sim_time: 0.0,
            seed,
            next_suite_id: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // ── Clock ───────────────────────────────────────────────────────────

    /// Advance the clock by `dt` seconds, firing every timer that comes due.
    pub fn advance(&mut self, dt: f64) {
        self.advance_to(self.sim_time + dt);
    }

    /// Advance the clock to an absolute sim time.
    ///
    /// Due timers fire in `(due, insertion)` order, each observing the sim
    /// time it was scheduled for.
    pub fn advance_to(&mut self, target: f64) {
        while let Some(entry) = self.scheduler.pop_due(target) {
            self.sim_time = self.sim_time.max(entry.due);
            let now = self.sim_time;

            match entry.kind {
                TimerKind::DecayTick => {
                    decay_tick(&mut self.state, &mut self.rng);
                    if let Some(id) = maybe_emit_wellness_toast(
                        &mut self.queue,
                        self.state.personal,
                        &self.settings,
                        now,
                        &mut self.rng,
                    ) {
                        self.scheduler
                            .schedule(now + TOAST_TTL, TimerKind::ToastExpiry(id));
                    }
                    self.scheduler
                        .schedule(now + DECAY_INTERVAL, TimerKind::DecayTick);
                }
                TimerKind::ToastExpiry(id) => {
                    // Stale entries for already-dismissed toasts are no-ops.
                    self.queue.dismiss(&id);
                }
                TimerKind::BreakCommit { clears } => {
                    if let Some(id) = clears {
                        self.queue.dismiss(&id);
                    }
                    commit_break(&mut self.state, now);
                    let id = self.queue.push(
                        NotificationKind::BreakComplete,
                        "Your wellness improved and the team mascot is happier!".to_string(),
                        None,
                        None,
                        now,
                    );
                    self.scheduler
                        .schedule(now + TOAST_TTL, TimerKind::ToastExpiry(id));
                    log::info!(
                        "break committed at {:.1}s, personal score {:.1}",
                        now,
                        self.state.personal
                    );
                }
            }
        }

        if target > self.sim_time {
            self.sim_time = target;
        }
    }

    // ── Actions ─────────────────────────────────────────────────────────

    /// Accept a break. The recovery commits after the connect delay; the
    /// named toast, if any, is cleared when it does.
    pub fn take_break(&mut self, clears: Option<&str>) {
        self.scheduler.schedule(
            self.sim_time + BREAK_CONNECT_DELAY,
            TimerKind::BreakCommit {
                clears: clears.map(str::to_string),
            },
        );
        log::debug!("break accepted, committing in {}s", BREAK_CONNECT_DELAY);
    }

    /// Dismiss the toast with this id before it expires.
    pub fn dismiss(&mut self, id: &str) -> bool {
        self.queue.dismiss(id)
    }

    /// Replace the settings wholesale.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    // ── Suite membership ────────────────────────────────────────────────

    /// Read the persisted suite record at startup. A missing or unreadable
    /// record leaves the session in the join prompt.
    pub fn load_suite(&mut self, store: &impl SuiteStore) -> Result<(), StoreError> {
        self.suite = store.load()?;
        Ok(())
    }

    /// Join a suite from the directory; the record persists with `joined`
    /// forced true and is otherwise unchanged.
    pub fn join_suite(
        &mut self,
        mut suite: Suite,
        store: &mut impl SuiteStore,
    ) -> Result<(), StoreError> {
        suite.joined = true;
        store.save(&suite)?;
        log::info!("joined suite {} ({})", suite.name, suite.id);
        self.suite = Some(suite);
        Ok(())
    }

    /// Join by raw code: synthesizes a one-member suite whose id and name
    /// are the code. Empty codes are ignored.
    pub fn join_by_code(
        &mut self,
        code: &str,
        store: &mut impl SuiteStore,
    ) -> Result<bool, StoreError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(false);
        }
        self.join_suite(Suite::new(code, code, 1), store)?;
        Ok(true)
    }

    /// Create and join a fresh one-member suite. Empty names are ignored.
    pub fn create_suite(
        &mut self,
        name: &str,
        store: &mut impl SuiteStore,
    ) -> Result<bool, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        self.next_suite_id += 1;
        let suite = Suite {
            id: format!("s{}", self.next_suite_id),
            name: name.to_string(),
            member_count: 1,
            joined: true,
        };
        store.save(&suite)?;
        log::info!("created suite {} ({})", suite.name, suite.id);
        self.suite = Some(suite);
        Ok(true)
    }

    /// Leave the current suite and delete the persisted record, returning
    /// the session to the join prompt.
    pub fn leave_suite(&mut self, store: &mut impl SuiteStore) -> Result<(), StoreError> {
        store.clear()?;
        if let Some(suite) = self.suite.take() {
            log::info!("left suite {}", suite.name);
        }
        Ok(())
    }

    /// Whether the join prompt should be shown.
    pub fn needs_onboarding(&self) -> bool {
        self.suite.is_none()
    }

    pub fn suite(&self) -> Option<&Suite> {
        self.suite.as_ref()
    }

    // ── Views ───────────────────────────────────────────────────────────

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn wellness(&self) -> &WellnessState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Toasts in insertion order.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn notification_count(&self) -> usize {
        self.queue.len()
    }

    pub fn band(&self) -> WellnessBand {
        WellnessBand::from_score(self.state.personal)
    }

    pub fn mascot_mood(&self) -> MascotMood {
        MascotMood::from_team_score(self.state.team)
    }

    pub fn privacy_level(&self) -> PrivacyLevel {
        PrivacyLevel::from_settings(&self.settings)
    }

    pub fn needs_break(&self) -> bool {
        wellness::needs_break(self.state.personal)
    }

    /// "2h 15m ago" style label for the last completed break.
    pub fn time_since_break(&self) -> String {
        format_time_since_break(self.sim_time, self.state.last_break_at)
    }

    /// Focus meter reading; jittered, so each call draws from the RNG.
    pub fn focus_level(&mut self) -> f32 {
        wellness::focus_level(self.state.personal, &mut self.rng)
    }

    /// Energy meter reading; jittered, so each call draws from the RNG.
    pub fn energy_level(&mut self) -> f32 {
        wellness::energy_level(self.state.personal, &mut self.rng)
    }

    /// Draw a break suggestion (partner, activity, location) for display.
    pub fn suggest_break(&mut self) -> BreakSuggestion {
        suggest_break(&mut self.rng)
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    /// Capture the session as a serializable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            sim_time: self.sim_time,
            seed: self.seed,
            next_suite_id: self.next_suite_id,
            state: self.state,
            settings: self.settings,
            suite: self.suite.clone(),
            queue: self.queue.clone(),
            scheduler: self.scheduler.clone(),
        }
    }

    /// Rebuild a simulator from a snapshot. The RNG restarts from the
    /// recorded seed.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: snapshot.state,
            settings: snapshot.settings,
            suite: snapshot.suite,
            queue: snapshot.queue,
            scheduler: snapshot.scheduler,
            sim_time: snapshot.sim_time,
            seed: snapshot.seed,
            next_suite_id: snapshot.next_suite_id,
            rng: StdRng::seed_from_u64(snapshot.seed),
        }
    }

    /// Save the session to a writer.
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SnapshotError> {
        persistence::save_snapshot(writer, &self.snapshot())
    }

    /// Load a session from a reader.
    pub fn load<R: std::io::Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot = persistence::load_snapshot(reader)?;
        log::debug!("restored session at {:.1}s", snapshot.sim_time);
        Ok(Self::from_snapshot(snapshot))
    }
}

impl Default for WellnessSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySuiteStore;
    use crate::wellness::DECAY_FLOOR;

    #[test]
    fn fresh_session_state() {
        let sim = WellnessSimulator::with_seed(1);
        assert_eq!(sim.sim_time(), 0.0);
        assert_eq!(sim.wellness().personal, 75.0);
        assert_eq!(sim.wellness().team, 67.0);
        assert!(sim.needs_onboarding());
        assert_eq!(sim.notification_count(), 0);
        assert_eq!(sim.time_since_break(), "2h 0m ago");
    }

    #[test]
    fn advance_runs_decay_ticks() {
        let mut sim = WellnessSimulator::with_seed(2);
        sim.advance(29.9);
        assert_eq!(sim.wellness().personal, 75.0);

        // 10 minutes = 20 ticks.
        sim.advance_to(600.0);
        assert!(sim.wellness().personal < 75.0);
        assert!(sim.wellness().personal >= DECAY_FLOOR);
        assert!((0.0..=100.0).contains(&sim.wellness().team));
        assert_eq!(sim.sim_time(), 600.0);
    }

    #[test]
    fn break_commits_after_connect_delay() {
        let mut sim = WellnessSimulator::with_seed(3);
        sim.take_break(None);

        // Nothing changes until the connect delay elapses.
        sim.advance(0.5);
        assert_eq!(sim.wellness().personal, 75.0);
        assert_eq!(sim.notification_count(), 0);

        sim.advance(0.5);
        assert_eq!(sim.wellness().personal, 100.0);
        assert_eq!(sim.wellness().last_break_at, 1.0);
        let toast = sim.notifications().next().unwrap();
        assert_eq!(toast.kind, NotificationKind::BreakComplete);
    }

    #[test]
    fn break_clears_the_named_toast() {
        let mut sim = WellnessSimulator::with_seed(4);
        let id = sim.queue.push(
            NotificationKind::Drowsiness,
            "test".to_string(),
            None,
            None,
            0.0,
        );
        sim.take_break(Some(&id));
        sim.advance(1.0);

        assert!(!sim.queue.contains(&id));
        let kinds: Vec<NotificationKind> = sim.notifications().map(|t| t.kind).collect();
        assert_eq!(kinds, [NotificationKind::BreakComplete]);
    }

    #[test]
    fn break_complete_toast_expires_on_its_own_clock() {
        let mut sim = WellnessSimulator::with_seed(5);
        sim.take_break(None);
        sim.advance(1.0);
        assert_eq!(sim.notification_count(), 1);

        // Present strictly before creation + TTL, gone at + TTL.
        sim.advance_to(1.0 + TOAST_TTL - 0.001);
        assert_eq!(sim.notification_count(), 1);
        sim.advance_to(1.0 + TOAST_TTL);
        assert_eq!(sim.notification_count(), 0);
    }

    #[test]
    fn dismissal_cancels_expiry() {
        let mut sim = WellnessSimulator::with_seed(6);
        sim.take_break(None);
        sim.advance(1.0);
        let id = sim.notifications().next().unwrap().id.clone();

        assert!(sim.dismiss(&id));
        // The stale expiry entry fires later without effect.
        sim.advance(TOAST_TTL + 1.0);
        assert_eq!(sim.notification_count(), 0);
    }

    #[test]
    fn concurrent_toasts_expire_independently() {
        let mut sim = WellnessSimulator::with_seed(7);
        sim.take_break(None);
        sim.advance(1.0); // first toast at t=1
        sim.take_break(None);
        sim.advance(4.0); // second toast at t=2
        assert_eq!(sim.notification_count(), 2);

        sim.advance_to(11.0); // first expires at t=11
        assert_eq!(sim.notification_count(), 1);
        sim.advance_to(12.0); // second expires at t=12
        assert_eq!(sim.notification_count(), 0);
    }

    #[test]
    fn join_persists_record_with_joined_forced_true() {
        let mut sim = WellnessSimulator::with_seed(8);
        let mut store = MemorySuiteStore::new();
        let suite = Suite::new("2", "Engineering Wing", 12);

        sim.join_suite(suite, &mut store).unwrap();

        assert!(!sim.needs_onboarding());
        let current = sim.suite().unwrap();
        assert_eq!(current.id, "2");
        assert_eq!(current.name, "Engineering Wing");
        assert_eq!(current.member_count, 12);
        assert!(current.joined);

        let persisted = store.load().unwrap().unwrap();
        assert_eq!(&persisted, current);
    }

    #[test]
    fn create_join_leave_cycle() {
        let mut sim = WellnessSimulator::with_seed(9);
        let mut store = MemorySuiteStore::new();

        assert!(!sim.create_suite("   ", &mut store).unwrap());
        assert!(sim.needs_onboarding());

        assert!(sim.create_suite("Night Shift", &mut store).unwrap());
        let suite = sim.suite().unwrap().clone();
        assert_eq!(suite.name, "Night Shift");
        assert_eq!(suite.member_count, 1);
        assert!(suite.joined);
        assert_eq!(store.load().unwrap(), Some(suite));

        sim.leave_suite(&mut store).unwrap();
        assert!(sim.needs_onboarding());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn join_by_code_synthesizes_a_suite() {
        let mut sim = WellnessSimulator::with_seed(10);
        let mut store = MemorySuiteStore::new();

        assert!(!sim.join_by_code("", &mut store).unwrap());
        assert!(sim.join_by_code("attic-7", &mut store).unwrap());

        let suite = sim.suite().unwrap();
        assert_eq!(suite.id, "attic-7");
        assert_eq!(suite.name, "attic-7");
        assert_eq!(suite.member_count, 1);
    }

    #[test]
    fn load_suite_picks_up_persisted_record() {
        let mut store = MemorySuiteStore::new();
        let mut first = WellnessSimulator::with_seed(11);
        first
            .join_suite(Suite::new("3", "Sales Team", 6), &mut store)
            .unwrap();

        let mut second = WellnessSimulator::with_seed(12);
        second.load_suite(&store).unwrap();
        assert_eq!(second.suite().map(|s| s.id.as_str()), Some("3"));
    }

    #[test]
    fn snapshot_round_trip_preserves_session() {
        let mut store = MemorySuiteStore::new();
        let mut sim = WellnessSimulator::with_seed(13);
        sim.join_suite(Suite::new("4", "Design Studio", 4), &mut store)
            .unwrap();
        sim.advance(95.0);
        sim.take_break(None);
        sim.advance(1.0);

        let mut buffer = Vec::new();
        sim.save(&mut buffer).unwrap();

        let restored = WellnessSimulator::load(&buffer[..]).unwrap();
        assert_eq!(restored.sim_time(), sim.sim_time());
        assert_eq!(restored.wellness(), sim.wellness());
        assert_eq!(restored.settings(), sim.settings());
        assert_eq!(restored.suite(), sim.suite());
        assert_eq!(restored.notification_count(), sim.notification_count());
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = WellnessSimulator::with_seed(99);
        let mut b = WellnessSimulator::with_seed(99);

        for sim in [&mut a, &mut b] {
            sim.set_settings(Settings::default());
            sim.advance(300.0);
            sim.take_break(None);
            sim.advance(300.0);
        }

        assert_eq!(a.wellness(), b.wellness());
        assert_eq!(a.sim_time(), b.sim_time());
        let ids_a: Vec<&str> = a.notifications().map(|t| t.id.as_str()).collect();
        let ids_b: Vec<&str> = b.notifications().map(|t| t.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }
}
