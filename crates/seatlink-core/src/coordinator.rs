// ── Polling coordinator ──
//
// A single-owner actor task drives the refresh cycle: it owns the timer,
// the in-flight fetch, and the published state. Consumers read the
// snapshot through an atomic pointer swap and never block the loop.
//
// Refreshes are strictly serialized: the loop runs one cycle at a time,
// and ticks that come due while a cycle is running are dropped, not
// queued. On-demand refresh requests queued behind a running cycle are
// coalesced into a single fetch.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{CoreError, ErrorKind};
use crate::fetcher::VehicleSource;
use crate::model::VehicleSnapshot;

const MESSAGE_CHANNEL_SIZE: usize = 64;

/// Consumer-visible record of the most recent refresh failure.
///
/// Cleared by the next successful refresh. While set, the snapshot is
/// stale: it still reflects the last successful cycle.
#[derive(Debug, Clone)]
pub struct RefreshFailure {
    pub kind: ErrorKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl RefreshFailure {
    fn from_error(err: &CoreError) -> Self {
        Self {
            kind: err.kind().unwrap_or(ErrorKind::Protocol),
            message: err.to_string(),
            at: Utc::now(),
        }
    }
}

impl From<RefreshFailure> for CoreError {
    fn from(failure: RefreshFailure) -> Self {
        CoreError::UpdateFailed {
            kind: failure.kind,
            message: failure.message,
        }
    }
}

enum Message {
    Refresh(oneshot::Sender<Result<(), RefreshFailure>>),
    SetInterval(Duration),
}

/// State published by the actor, read lock-free by consumers.
#[derive(Debug, Default)]
struct Published {
    snapshot: ArcSwapOption<VehicleSnapshot>,
    last_error: ArcSwapOption<RefreshFailure>,
    last_success: ArcSwapOption<DateTime<Utc>>,
}

/// Handle to the polling coordinator for one account.
///
/// Cheaply cloneable; dropping all clones does not stop the loop — call
/// [`shutdown`](Self::shutdown) (the registry does this on unbind).
#[derive(Clone, Debug)]
pub struct VehicleCoordinator {
    published: Arc<Published>,
    tx: mpsc::Sender<Message>,
    cycles: watch::Receiver<u64>,
    cancel: CancellationToken,
}

impl VehicleCoordinator {
    /// Run the first refresh and start the polling loop.
    ///
    /// The first refresh is awaited: if it fails, no task is spawned and
    /// the error propagates — an account that cannot produce one snapshot
    /// is not bound. Later failures only mark staleness.
    pub async fn start(
        source: Arc<dyn VehicleSource>,
        update_interval: Duration,
    ) -> Result<Self, CoreError> {
        let published = Arc::new(Published::default());

        let snapshot = source.fetch().await?;
        info!(vehicles = snapshot.len(), "initial refresh complete");
        published.snapshot.store(Some(Arc::new(snapshot)));
        published.last_success.store(Some(Arc::new(Utc::now())));

        let (tx, rx) = mpsc::channel(MESSAGE_CHANNEL_SIZE);
        let (cycle_tx, cycles) = watch::channel(1_u64);
        let cancel = CancellationToken::new();

        tokio::spawn(run_loop(
            source,
            Arc::clone(&published),
            rx,
            cycle_tx,
            update_interval,
            cancel.clone(),
        ));

        Ok(Self {
            published,
            tx,
            cycles,
            cancel,
        })
    }

    // ── State accessors ──────────────────────────────────────────

    /// The last successful snapshot. Never fails; stays at the previous
    /// snapshot when the latest attempt failed, `None` only before the
    /// first success (which `start` guarantees has happened).
    pub fn snapshot(&self) -> Option<Arc<VehicleSnapshot>> {
        self.published.snapshot.load_full()
    }

    /// The most recent refresh failure, if the latest cycle failed.
    pub fn last_error(&self) -> Option<RefreshFailure> {
        self.published.last_error.load_full().map(|f| (*f).clone())
    }

    /// When the last successful refresh completed.
    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.published.last_success.load_full().map(|t| *t)
    }

    /// Whether the current snapshot is stale (latest cycle failed).
    pub fn is_stale(&self) -> bool {
        self.published.last_error.load().is_some()
    }

    /// Subscribe to completed refresh cycles (success or failure).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.cycles.clone()
    }

    // ── Control ──────────────────────────────────────────────────

    /// Refresh outside the polling cadence and wait for completion.
    ///
    /// Requests queued while a cycle runs are coalesced: every waiter is
    /// served by the single fetch that follows. A caller that cancels
    /// this future does not cancel the refresh — the coordinator stores
    /// the result regardless.
    pub async fn request_refresh(&self) -> Result<(), CoreError> {
        let (ack, done) = oneshot::channel();
        self.tx
            .send(Message::Refresh(ack))
            .await
            .map_err(|_| CoreError::CoordinatorStopped)?;
        match done.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(failure)) => Err(failure.into()),
            Err(_) => Err(CoreError::CoordinatorStopped),
        }
    }

    /// Reschedule future ticks. Does not interrupt an in-flight refresh.
    pub async fn set_update_interval(&self, interval: Duration) {
        if self.tx.send(Message::SetInterval(interval)).await.is_err() {
            debug!("set_update_interval on a stopped coordinator");
        }
    }

    /// Stop the polling loop. In-flight work finishes, then the task exits.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

// ── Actor loop ───────────────────────────────────────────────────

async fn run_loop(
    source: Arc<dyn VehicleSource>,
    published: Arc<Published>,
    mut rx: mpsc::Receiver<Message>,
    cycle_tx: watch::Sender<u64>,
    update_interval: Duration,
    cancel: CancellationToken,
) {
    let mut interval = make_interval(update_interval);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            msg = rx.recv() => {
                let Some(msg) = msg else { break };
                match msg {
                    Message::SetInterval(dt) => {
                        debug!(secs = dt.as_secs(), "update interval changed");
                        interval = make_interval(dt);
                        interval.tick().await;
                    }
                    Message::Refresh(ack) => {
                        // Coalesce: everyone queued by now is served by
                        // one fetch.
                        let mut acks = vec![ack];
                        let mut new_interval = None;
                        while let Ok(next) = rx.try_recv() {
                            match next {
                                Message::Refresh(a) => acks.push(a),
                                Message::SetInterval(dt) => new_interval = Some(dt),
                            }
                        }

                        let result = run_refresh(source.as_ref(), &published, &cycle_tx).await;
                        for ack in acks {
                            let _ = ack.send(result.clone());
                        }

                        if let Some(dt) = new_interval {
                            debug!(secs = dt.as_secs(), "update interval changed");
                            interval = make_interval(dt);
                            interval.tick().await;
                        }
                    }
                }
            }
            _ = interval.tick() => {
                let _ = run_refresh(source.as_ref(), &published, &cycle_tx).await;
            }
        }
    }
    debug!("coordinator loop stopped");
}

fn make_interval(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(period);
    // Ticks that come due while a refresh runs are dropped, never queued.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn run_refresh(
    source: &dyn VehicleSource,
    published: &Published,
    cycle_tx: &watch::Sender<u64>,
) -> Result<(), RefreshFailure> {
    let result = match source.fetch().await {
        Ok(snapshot) => {
            debug!(vehicles = snapshot.len(), "refresh succeeded");
            published.snapshot.store(Some(Arc::new(snapshot)));
            published.last_error.store(None);
            published.last_success.store(Some(Arc::new(Utc::now())));
            Ok(())
        }
        Err(err) => {
            let failure = RefreshFailure::from_error(&err);
            warn!(
                kind = %failure.kind,
                error = %err,
                "refresh failed; retaining previous snapshot"
            );
            published.last_error.store(Some(Arc::new(failure.clone())));
            Err(failure)
        }
    };
    cycle_tx.send_modify(|n| *n += 1);
    result
}
