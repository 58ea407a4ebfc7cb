//! TTL cache between the dashboard and its data sources
//!
//! Each kind of data has its own entry, lock and time-to-live:
//!
//! | Kind | TTL |
//! |------|-----|
//! | VM status | 2s |
//! | Sessions | 10s |
//! | Daily activity | 30s |
//! | Projects | 10s |
//!
//! A getter called with `force = false` returns the stored value while it is
//! fresh and only calls the source once it has gone stale. `force = true`
//! always refetches. Fetches run outside any lock, so two callers may fetch
//! the same kind at once; the later write wins.
//!
//! Projects are derived from sessions. Replacing the sessions entry clears
//! the projects entry under the same pair of locks (always taken sessions
//! first, then projects), and a projects entry remembers which sessions value
//! it was computed from so a snapshot never mixes generations.

use crate::source::{DataSource, FileSource};
use crate::types::{aggregate_projects, DailyActivity, DashboardData, ProjectSummary, SessionEntry, VmStatus};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

pub const VM_TTL: Duration = Duration::from_secs(2);
pub const SESSIONS_TTL: Duration = Duration::from_secs(10);
pub const ACTIVITY_TTL: Duration = Duration::from_secs(30);
pub const PROJECTS_TTL: Duration = Duration::from_secs(10);

/// Source of "now" for freshness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
enum Cached<T> {
    Absent,
    Stored { value: T, captured_at: Instant },
}

impl<T: Clone> Cached<T> {
    fn fresh(&self, now: Instant, ttl: Duration) -> Option<T> {
        match self {
            Cached::Stored { value, captured_at } if now.duration_since(*captured_at) < ttl => {
                Some(value.clone())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct DerivedProjects {
    projects: Arc<Vec<ProjectSummary>>,
    from_sessions: Arc<Vec<SessionEntry>>,
}

pub struct CacheStore<S = FileSource, C = SystemClock> {
    source: S,
    clock: C,
    vm: RwLock<Cached<Arc<VmStatus>>>,
    sessions: RwLock<Cached<Arc<Vec<SessionEntry>>>>,
    activity: RwLock<Cached<Arc<Vec<DailyActivity>>>>,
    projects: RwLock<Cached<DerivedProjects>>,
}

impl<S: DataSource> CacheStore<S, SystemClock> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S: DataSource, C: Clock> CacheStore<S, C> {
    pub fn with_clock(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            vm: RwLock::new(Cached::Absent),
            sessions: RwLock::new(Cached::Absent),
            activity: RwLock::new(Cached::Absent),
            projects: RwLock::new(Cached::Absent),
        }
    }

    pub fn vm_status(&self, force: bool) -> Arc<VmStatus> {
        if !force {
            if let Some(value) = self.read_fresh(&self.vm, VM_TTL) {
                return value;
            }
        }
        let value = Arc::new(self.source.vm_status());
        self.store(&self.vm, value.clone());
        value
    }

    pub fn sessions(&self, force: bool) -> Arc<Vec<SessionEntry>> {
        if !force {
            if let Some(value) = self.read_fresh(&self.sessions, SESSIONS_TTL) {
                return value;
            }
        }
        let value = Arc::new(self.source.sessions());
        let now = self.clock.now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let mut projects = self.projects.write().unwrap_or_else(PoisonError::into_inner);
        *sessions = Cached::Stored {
            value: value.clone(),
            captured_at: now,
        };
        *projects = Cached::Absent;
        tracing::debug!(count = value.len(), "Sessions cache replaced");
        value
    }

    pub fn daily_activity(&self, force: bool) -> Arc<Vec<DailyActivity>> {
        if !force {
            if let Some(value) = self.read_fresh(&self.activity, ACTIVITY_TTL) {
                return value;
            }
        }
        let value = Arc::new(self.source.daily_activity());
        self.store(&self.activity, value.clone());
        value
    }

    pub fn projects(&self, force: bool) -> Arc<Vec<ProjectSummary>> {
        if !force {
            if let Some(entry) = self.read_fresh(&self.projects, PROJECTS_TTL) {
                return entry.projects;
            }
        }
        let sessions = self.sessions(force);
        self.projects_for(&sessions, force)
    }

    /// Build one consistent snapshot of every kind.
    pub fn dashboard(&self, force: bool) -> DashboardData {
        let vm_status = self.vm_status(force);
        let sessions = self.sessions(force);
        let daily_activity = self.daily_activity(force);
        let projects = self.projects_for(&sessions, force);

        DashboardData {
            vm_status: (*vm_status).clone(),
            sessions: (*sessions).clone(),
            daily_activity: (*daily_activity).clone(),
            projects: (*projects).clone(),
        }
    }

    /// Refetch everything regardless of freshness.
    pub fn refresh_all(&self) -> DashboardData {
        tracing::debug!("Forced refresh of all cache entries");
        self.dashboard(true)
    }

    /// Projects derived from exactly this sessions value.
    fn projects_for(
        &self,
        sessions: &Arc<Vec<SessionEntry>>,
        force: bool,
    ) -> Arc<Vec<ProjectSummary>> {
        if !force {
            let cached = self.read_fresh(&self.projects, PROJECTS_TTL);
            if let Some(entry) = cached {
                if Arc::ptr_eq(&entry.from_sessions, sessions) {
                    return entry.projects;
                }
            }
        }

        let projects = Arc::new(aggregate_projects(sessions));

        // Only publish if the sessions we derived from are still current.
        let now = self.clock.now();
        let current = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        if let Cached::Stored { value, .. } = &*current {
            if Arc::ptr_eq(value, sessions) {
                let mut slot = self.projects.write().unwrap_or_else(PoisonError::into_inner);
                *slot = Cached::Stored {
                    value: DerivedProjects {
                        projects: projects.clone(),
                        from_sessions: sessions.clone(),
                    },
                    captured_at: now,
                };
            }
        }

        projects
    }

    fn read_fresh<T: Clone>(&self, slot: &RwLock<Cached<T>>, ttl: Duration) -> Option<T> {
        let now = self.clock.now();
        slot.read()
            .unwrap_or_else(PoisonError::into_inner)
            .fresh(now, ttl)
    }

    fn store<T>(&self, slot: &RwLock<Cached<T>>, value: T) {
        let now = self.clock.now();
        *slot.write().unwrap_or_else(PoisonError::into_inner) = Cached::Stored {
            value,
            captured_at: now,
        };
    }

    #[cfg(test)]
    fn projects_cached(&self) -> bool {
        matches!(
            *self.projects.read().unwrap_or_else(PoisonError::into_inner),
            Cached::Stored { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for Arc<ManualClock> {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[derive(Default)]
    struct CountingSource {
        vm_calls: AtomicUsize,
        session_calls: AtomicUsize,
        activity_calls: AtomicUsize,
        sessions: Mutex<Vec<SessionEntry>>,
    }

    impl DataSource for Arc<CountingSource> {
        fn vm_status(&self) -> VmStatus {
            self.vm_calls.fetch_add(1, Ordering::SeqCst);
            VmStatus {
                running: true,
                pid: Some(42),
                cpu_percent: Some(1.5),
                memory_mb: None,
            }
        }

        fn sessions(&self) -> Vec<SessionEntry> {
            self.session_calls.fetch_add(1, Ordering::SeqCst);
            self.sessions.lock().unwrap().clone()
        }

        fn daily_activity(&self) -> Vec<DailyActivity> {
            self.activity_calls.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        }
    }

    fn session(id: &str, path: &str, hour: u32) -> SessionEntry {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap();
        SessionEntry {
            session_id: id.to_string(),
            project_path: path.to_string(),
            project_name: path.trim_start_matches('/').to_string(),
            summary: String::new(),
            message_count: 1,
            created: ts,
            modified: ts,
            git_branch: None,
        }
    }

    fn store() -> (
        CacheStore<Arc<CountingSource>, Arc<ManualClock>>,
        Arc<CountingSource>,
        Arc<ManualClock>,
    ) {
        crate::logging::init_test();
        let source = Arc::new(CountingSource::default());
        *source.sessions.lock().unwrap() = vec![session("s1", "/a", 1)];
        let clock = Arc::new(ManualClock::new());
        (
            CacheStore::with_clock(source.clone(), clock.clone()),
            source,
            clock,
        )
    }

    #[test]
    fn test_fresh_entry_is_reused() {
        let (cache, source, clock) = store();

        let first = cache.sessions(false);
        let second = cache.sessions(false);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.session_calls.load(Ordering::SeqCst), 1);

        clock.advance(SESSIONS_TTL);
        let third = cache.sessions(false);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(source.session_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_each_kind_has_its_own_ttl() {
        let (cache, source, clock) = store();
        cache.vm_status(false);
        cache.daily_activity(false);

        clock.advance(Duration::from_secs(3));
        cache.vm_status(false);
        cache.daily_activity(false);
        assert_eq!(source.vm_calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.activity_calls.load(Ordering::SeqCst), 1);

        clock.advance(Duration::from_secs(30));
        cache.daily_activity(false);
        assert_eq!(source.activity_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_force_bypasses_ttl() {
        let (cache, source, _clock) = store();
        cache.vm_status(false);
        cache.vm_status(true);
        assert_eq!(source.vm_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_sessions_replacement_clears_projects() {
        let (cache, _source, _clock) = store();
        cache.projects(false);
        assert!(cache.projects_cached());

        cache.sessions(true);
        assert!(!cache.projects_cached());
    }

    #[test]
    fn test_projects_reused_within_ttl() {
        let (cache, source, _clock) = store();
        let first = cache.projects(false);
        let second = cache.projects(false);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.session_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fresh_projects_outlive_stale_sessions() {
        let (cache, source, clock) = store();
        cache.sessions(false);

        clock.advance(Duration::from_secs(5));
        let first = cache.projects(false);

        // Sessions are now 11s old, projects only 6s.
        clock.advance(Duration::from_secs(6));
        let second = cache.projects(false);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.session_calls.load(Ordering::SeqCst), 1);

        clock.advance(PROJECTS_TTL);
        cache.projects(false);
        assert_eq!(source.session_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_snapshot_projects_follow_sessions() {
        let (cache, source, clock) = store();
        let before = cache.dashboard(false);
        assert_eq!(before.projects.len(), 1);

        source
            .sessions
            .lock()
            .unwrap()
            .push(session("s2", "/b", 5));
        clock.advance(SESSIONS_TTL);

        let after = cache.dashboard(false);
        assert_eq!(after.sessions.len(), 2);
        assert_eq!(after.projects, aggregate_projects(&after.sessions));
        assert_eq!(after.projects[0].project_path, "/b");
    }

    #[test]
    fn test_refresh_all_fetches_everything() {
        let (cache, source, _clock) = store();
        cache.dashboard(false);
        let snapshot = cache.refresh_all();
        assert_eq!(source.vm_calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.session_calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.activity_calls.load(Ordering::SeqCst), 2);
        assert_eq!(snapshot.vm_status.pid, Some(42));
        assert_eq!(snapshot.projects, aggregate_projects(&snapshot.sessions));
    }
}
