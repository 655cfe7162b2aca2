//! Sleep timer countdown engine

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::{format_compact, format_remaining, Clock, TimerSession};
use crate::{
    config::TimerSettings,
    state::TimerState,
    surfaces::{DisplaySurface, NotificationLevel, Notifier, VideoAction},
};

/// Countdown that pauses playback once the requested duration has elapsed.
///
/// Remaining time is always recomputed from the clock delta since start, so
/// late ticks never make the countdown drift. At most one session runs at a
/// time: `start` and `reset` abort the pending tick before touching state.
pub struct CountdownTimer {
    shared: Arc<Shared>,
}

struct Shared {
    settings: TimerSettings,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    display: Arc<dyn DisplaySurface>,
    action: Arc<dyn VideoAction>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    session: TimerSession,
    tick_handle: Option<JoinHandle<()>>,
    /// Bumped on every cancellation; a tick chain only acts on its own generation
    generation: u64,
}

enum TickOutcome {
    Continue,
    Expired,
}

impl CountdownTimer {
    pub fn new(
        settings: TimerSettings,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        display: Arc<dyn DisplaySurface>,
        action: Arc<dyn VideoAction>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                settings,
                clock,
                notifier,
                display,
                action,
                inner: Mutex::new(Inner::default()),
            }),
        }
    }

    /// Start a new session of `minutes`, replacing any running one.
    ///
    /// Callers validate `minutes` (1..=999). Must be called within a tokio runtime.
    pub fn start(&self, minutes: u32) {
        let shared = &self.shared;
        let mut inner = shared.lock();
        shared.stop_locked(&mut inner);

        let now = shared.clock.now_millis();
        inner.session = TimerSession::begin(now, minutes, Utc::now());
        let generation = inner.generation;

        info!("Sleep timer started for {} minutes", minutes);
        shared.notifier.show(
            &format!("Sleep timer set for {} minutes", minutes),
            NotificationLevel::Success,
        );

        match shared.tick_locked(&mut inner, now) {
            TickOutcome::Continue => {
                let chain = Arc::clone(shared);
                inner.tick_handle = Some(tokio::spawn(run_ticks(chain, generation)));
            }
            TickOutcome::Expired => {
                shared.begin_expiry(&mut inner);
                let chain = Arc::clone(shared);
                tokio::spawn(async move { chain.finish_expiry(generation).await });
            }
        }
    }

    /// Cancel the pending tick. The last displayed values are left in place.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        self.shared.stop_locked(&mut inner);
    }

    /// Stop and clear the session, returning the display to idle. No-op when idle.
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        self.shared.reset_locked(&mut inner);
    }

    /// User-initiated cancellation. Returns whether a session was running.
    pub fn cancel(&self) -> bool {
        let was_active = {
            let mut inner = self.shared.lock();
            let was_active = inner.session.active;
            self.shared.reset_locked(&mut inner);
            was_active
        };

        if was_active {
            info!("Sleep timer cancelled");
            self.shared
                .notifier
                .show("Sleep timer cancelled", NotificationLevel::Info);
        } else {
            self.shared
                .notifier
                .show("No sleep timer is running", NotificationLevel::Info);
        }
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.shared.lock().session.active
    }

    /// `H:MM:SS` or `M:SS`; empty when inactive
    pub fn remaining_display(&self) -> String {
        match self.live_remaining_seconds() {
            Some(seconds) => format_remaining(seconds),
            None => String::new(),
        }
    }

    /// `{minutes}m` or `<1m`; empty when inactive
    pub fn compact_remaining_display(&self) -> String {
        match self.live_remaining_seconds() {
            Some(seconds) => format_compact(seconds),
            None => String::new(),
        }
    }

    pub fn snapshot(&self) -> TimerState {
        let inner = self.shared.lock();
        let session = &inner.session;
        if !session.active {
            return TimerState::inactive();
        }

        TimerState {
            active: true,
            remaining_seconds: Some(session.remaining_seconds),
            remaining: format_remaining(session.remaining_seconds),
            remaining_compact: format_compact(session.remaining_seconds),
            total_minutes: Some(session.total_minutes()),
            started_at: session.started_at_utc,
            ends_at: session.ends_at_utc(),
            warning_fired: session.warning_fired,
        }
    }

    pub fn settings(&self) -> TimerSettings {
        self.shared.settings
    }

    fn live_remaining_seconds(&self) -> Option<u64> {
        let inner = self.shared.lock();
        let session = &inner.session;
        (session.active && session.remaining_seconds > 0).then_some(session.remaining_seconds)
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        self.shared.stop_locked(&mut inner);
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("CountdownTimer")
            .field("settings", &self.shared.settings)
            .field("session", &inner.session)
            .field("generation", &inner.generation)
            .finish()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Session state is plain data, so a panic elsewhere cannot leave it half-written
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stop_locked(&self, inner: &mut Inner) {
        if let Some(handle) = inner.tick_handle.take() {
            handle.abort();
            debug!("Pending sleep timer tick cancelled");
        }
        inner.generation = inner.generation.wrapping_add(1);
        inner.session.active = false;
    }

    fn reset_locked(&self, inner: &mut Inner) {
        self.stop_locked(inner);
        inner.session = TimerSession::default();
        self.display.remove();
    }

    fn tick_locked(&self, inner: &mut Inner, now: i64) -> TickOutcome {
        let settings = &self.settings;
        let session = &mut inner.session;
        let remaining_ms = session.recompute(now);
        let remaining_seconds = session.remaining_seconds;

        if remaining_seconds > 0 && session.display_due(now, settings.display_interval_ms()) {
            self.display.update_badge(&format_compact(remaining_seconds));
            self.display.update_banner(
                &format_remaining(remaining_seconds),
                remaining_seconds <= settings.warning_threshold_secs,
            );
            session.last_displayed_at = Some(now);
            debug!("Sleep timer display refreshed: {}s remaining", remaining_seconds);
        }

        if session.warning_due(settings.warning_threshold_secs) {
            session.warning_fired = true;
            self.notifier.show(
                &warning_message(settings.warning_threshold_secs),
                NotificationLevel::Warning,
            );
        }

        if remaining_ms <= 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Continue
        }
    }

    /// Detach the running chain so a concurrent `start` cannot abort the expiry
    /// action midway, and stop reporting the session as active.
    fn begin_expiry(&self, inner: &mut Inner) {
        drop(inner.tick_handle.take());
        inner.session.active = false;
    }

    async fn finish_expiry(&self, generation: u64) {
        info!("Sleep timer expired, pausing playback");

        let paused = self.action.pause().await;
        if let Err(e) = &paused {
            error!("Failed to pause playback: {}", e);
        }

        let mut inner = self.lock();
        if inner.generation != generation {
            // The user cancelled or started a new session while pausing
            debug!("Sleep timer session replaced during expiry, skipping completion");
            return;
        }

        match paused {
            Ok(()) => self.notifier.show(
                "Sleep timer: Timer ended - video paused",
                NotificationLevel::Info,
            ),
            Err(e) => self.notifier.show(
                &format!("Sleep timer ended but pausing failed: {}", e),
                NotificationLevel::Error,
            ),
        }
        self.reset_locked(&mut inner);
    }
}

/// Tick chain for one session; each tick schedules the next only after finishing
async fn run_ticks(shared: Arc<Shared>, generation: u64) {
    loop {
        tokio::time::sleep(shared.settings.tick_interval).await;

        let outcome = {
            let mut inner = shared.lock();
            if inner.generation != generation {
                return;
            }
            let now = shared.clock.now_millis();
            let outcome = shared.tick_locked(&mut inner, now);
            if let TickOutcome::Expired = outcome {
                shared.begin_expiry(&mut inner);
            }
            outcome
        };

        if let TickOutcome::Expired = outcome {
            shared.finish_expiry(generation).await;
            return;
        }
    }
}

fn warning_message(threshold_secs: u64) -> String {
    match threshold_secs {
        60 => "Sleep timer: 1 minute remaining".to_string(),
        secs if secs % 60 == 0 => format!("Sleep timer: {} minutes remaining", secs / 60),
        secs => format!("Sleep timer: {} remaining", format_remaining(secs)),
    }
}
