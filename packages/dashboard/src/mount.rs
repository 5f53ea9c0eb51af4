//! A mounted dashboard: one background fetch feeding a shared state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use disaster_map_incident::normalize_all;
use disaster_map_source::IncidentReader;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state::{DashboardEvent, DashboardState};

/// Owns the dashboard state for as long as the view is mounted.
///
/// [`DashboardMount::mount`] starts exactly one fetch. Once unmounted,
/// whether explicitly or by drop, the fetch is cancelled and a late
/// result is discarded instead of being applied.
pub struct DashboardMount {
    state: Arc<Mutex<DashboardState>>,
    mounted: Arc<AtomicBool>,
    settled: watch::Receiver<bool>,
    task: Option<JoinHandle<()>>,
}

fn lock(state: &Mutex<DashboardState>) -> MutexGuard<'_, DashboardState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DashboardMount {
    /// Mounts the dashboard and starts fetching from `reader`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn mount(reader: Arc<dyn IncidentReader>) -> Self {
        let state = Arc::new(Mutex::new(DashboardState::new()));
        let mounted = Arc::new(AtomicBool::new(true));
        let (settled_tx, settled) = watch::channel(false);

        let task = tokio::spawn({
            let state = state.clone();
            let mounted = mounted.clone();
            async move {
                let event = match reader.fetch_latest().await {
                    Ok(records) => {
                        let incidents = normalize_all(&records);
                        log::info!("Loaded {} incidents", incidents.len());
                        DashboardEvent::Loaded(incidents)
                    }
                    Err(e) => {
                        log::error!("Failed to fetch incidents: {e}");
                        DashboardEvent::LoadFailed
                    }
                };

                // Checked under the state lock so an unmount cannot slip in
                // between the check and the update.
                let mut state = lock(&state);
                if !mounted.load(Ordering::Acquire) {
                    log::debug!("Dashboard unmounted before the fetch settled, discarding result");
                    return;
                }
                state.apply(event);
                drop(state);
                let _ = settled_tx.send(true);
            }
        });

        Self {
            state,
            mounted,
            settled,
            task: Some(task),
        }
    }

    /// Waits for the fetch to settle and returns the resulting state.
    ///
    /// Returns the current (still loading) state if the dashboard is
    /// unmounted first.
    pub async fn settled(&self) -> DashboardState {
        let mut settled = self.settled.clone();
        if settled.wait_for(|done| *done).await.is_err() {
            log::debug!("Dashboard fetch ended without settling");
        }
        self.snapshot()
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> DashboardState {
        lock(&self.state).clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Applies a user event and returns the new state. Ignored once
    /// unmounted.
    pub fn dispatch(&self, event: DashboardEvent) -> DashboardState {
        let mut state = lock(&self.state);
        if self.is_mounted() {
            state.apply(event);
        }
        state.clone()
    }

    /// Unmounts the dashboard, cancelling the fetch if it is still running.
    pub fn unmount(&mut self) {
        {
            let _state = lock(&self.state);
            self.mounted.store(false, Ordering::Release);
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for DashboardMount {
    fn drop(&mut self) {
        self.unmount();
    }
}
