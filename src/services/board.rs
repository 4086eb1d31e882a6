//! Optimistic stage transitions for the drag-and-drop pipeline board.
//!
//! A drop publishes an overlay snapshot with the moved card already in its new
//! column, then persists the stage change in the background. On success the
//! overlay is cleared once the settle delay (measured from the drop) has
//! passed, so the view falls back to the refreshed store data. On failure the
//! overlay is cleared right away, which rolls the card back.
//!
//! Overlays carry a generation number. A background task only clears the
//! snapshot it published, so a slow first drag cannot wipe a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::domain::opportunity::Opportunity;
use crate::domain::stage::Stage;
use crate::domain::types::OpportunityId;
use crate::domain::user::AuthenticatedUser;
use crate::dto::board::BoardColumn;
use crate::repository::OpportunityWriter;
use crate::services::notify::{Notification, Notifier, report_outcome};
use crate::services::opportunity::move_opportunity;
use crate::services::pipeline::board_columns;
use crate::services::session::IdentityProvider;
use crate::services::{ServiceError, ServiceResult};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Result reported by the drag-and-drop layer when a card is released.
///
/// `over_id` is either another card's id or a stage id (empty column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub active_id: String,
    pub over_id: Option<String>,
}

impl DragEnd {
    pub fn new(active_id: impl Into<String>, over_id: Option<&str>) -> Self {
        Self {
            active_id: active_id.into(),
            over_id: over_id.map(str::to_string),
        }
    }
}

/// Provisional opportunity list shown instead of the store data.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub opportunities: Arc<[Opportunity]>,
}

#[derive(Debug)]
pub enum DragOutcome {
    /// Nothing to persist; any overlay was cleared.
    Unchanged,
    /// No signed-in user; the move was not attempted.
    Rejected,
    /// Overlay published and the stage change is being persisted by `sync`.
    Moved {
        opportunity_id: OpportunityId,
        from: Stage,
        to: Stage,
        sync: JoinHandle<ServiceResult<Opportunity>>,
    },
}

struct Overlay {
    sender: watch::Sender<Option<Snapshot>>,
    generation: AtomicU64,
}

impl Overlay {
    fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender,
            generation: AtomicU64::new(0),
        }
    }

    fn publish(&self, opportunities: Vec<Opportunity>) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.sender.send_replace(Some(Snapshot {
            generation,
            opportunities: opportunities.into(),
        }));
        generation
    }

    fn clear(&self) {
        self.sender.send_if_modified(|current| current.take().is_some());
    }

    /// Clears the overlay only if it is still the one published as `generation`.
    fn clear_generation(&self, generation: u64) -> bool {
        self.sender.send_if_modified(|current| {
            if current
                .as_ref()
                .is_some_and(|snapshot| snapshot.generation == generation)
            {
                *current = None;
                true
            } else {
                false
            }
        })
    }

    fn current(&self) -> Option<Snapshot> {
        self.sender.borrow().clone()
    }
}

/// Board state owned by the view: drag feedback plus the optimistic overlay.
pub struct PipelineBoard<R> {
    runtime: Handle,
    repo: Arc<R>,
    notifier: Arc<dyn Notifier>,
    identity: Arc<dyn IdentityProvider>,
    settle_delay: Duration,
    overlay: Arc<Overlay>,
    dragging: Option<OpportunityId>,
}

impl<R> PipelineBoard<R>
where
    R: OpportunityWriter + Send + Sync + 'static,
{
    /// `runtime` runs the background stage updates, so drops may be handled
    /// from threads outside that runtime.
    pub fn new(
        runtime: Handle,
        repo: Arc<R>,
        notifier: Arc<dyn Notifier>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            runtime,
            repo,
            notifier,
            identity,
            settle_delay: DEFAULT_SETTLE_DELAY,
            overlay: Arc::new(Overlay::new()),
            dragging: None,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Records the card being dragged. Visual feedback only.
    pub fn on_drag_start(&mut self, active_id: &str) {
        self.dragging = active_id.parse().ok();
    }

    pub fn dragging(&self) -> Option<OpportunityId> {
        self.dragging
    }

    /// Current overlay, if a move is pending.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.overlay.current()
    }

    /// Receiver that observes every overlay publish and clear.
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.overlay.sender.subscribe()
    }

    /// Opportunities to render: the overlay when present, else `authoritative`.
    pub fn view(&self, authoritative: &[Opportunity]) -> Vec<Opportunity> {
        match self.overlay.current() {
            Some(snapshot) => snapshot.opportunities.to_vec(),
            None => authoritative.to_vec(),
        }
    }

    pub fn columns(&self, authoritative: &[Opportunity]) -> Vec<BoardColumn> {
        board_columns(&self.view(authoritative))
    }

    /// Handles a drop.
    pub fn on_drag_end(&mut self, result: &DragEnd, authoritative: &[Opportunity]) -> DragOutcome {
        self.dragging = None;

        let Some(over_id) = result
            .over_id
            .as_deref()
            .filter(|over_id| *over_id != result.active_id)
        else {
            self.overlay.clear();
            return DragOutcome::Unchanged;
        };

        let working = self.view(authoritative);
        let Some(dragged) = find_opportunity(&working, &result.active_id) else {
            log::debug!("Dropped unknown card `{}`", result.active_id);
            self.overlay.clear();
            return DragOutcome::Unchanged;
        };

        let id = dragged.id;
        let from = dragged.stage;
        let to = resolve_destination(&working, over_id).unwrap_or(from);
        if to == from {
            self.overlay.clear();
            return DragOutcome::Unchanged;
        }

        let Some(actor) = self.identity.current_user() else {
            log::warn!("Rejected move of opportunity {id} without a signed-in user");
            self.notifier
                .notify(Notification::error(ServiceError::Unauthorized.to_string()));
            self.overlay.clear();
            return DragOutcome::Rejected;
        };

        let moved = working
            .iter()
            .map(|opportunity| {
                if opportunity.id == id {
                    opportunity.with_stage(to)
                } else {
                    opportunity.clone()
                }
            })
            .collect();
        let generation = self.overlay.publish(moved);
        log::debug!("Opportunity {id} shown in {to} (overlay {generation})");

        let sync = self.runtime.spawn(persist_move(
            Arc::clone(&self.repo),
            Arc::clone(&self.notifier),
            Arc::clone(&self.overlay),
            PendingMove {
                actor,
                id,
                to,
                generation,
                settle_at: Instant::now() + self.settle_delay,
            },
        ));

        DragOutcome::Moved {
            opportunity_id: id,
            from,
            to,
            sync,
        }
    }
}

fn find_opportunity<'a>(opportunities: &'a [Opportunity], raw_id: &str) -> Option<&'a Opportunity> {
    let id = raw_id.parse::<OpportunityId>().ok()?;
    opportunities.iter().find(|opportunity| opportunity.id == id)
}

/// A card id resolves to that card's stage; otherwise the target may be a stage id.
fn resolve_destination(opportunities: &[Opportunity], over_id: &str) -> Option<Stage> {
    find_opportunity(opportunities, over_id)
        .map(|opportunity| opportunity.stage)
        .or_else(|| over_id.parse().ok())
}

struct PendingMove {
    actor: AuthenticatedUser,
    id: OpportunityId,
    to: Stage,
    generation: u64,
    settle_at: Instant,
}

async fn persist_move<R>(
    repo: Arc<R>,
    notifier: Arc<dyn Notifier>,
    overlay: Arc<Overlay>,
    pending: PendingMove,
) -> ServiceResult<Opportunity>
where
    R: OpportunityWriter + Send + Sync + 'static,
{
    let PendingMove {
        actor,
        id,
        to,
        generation,
        settle_at,
    } = pending;

    let result = tokio::task::spawn_blocking(move || move_opportunity(repo.as_ref(), &actor, id, to))
        .await
        .map_err(|err| ServiceError::Internal(format!("stage update task failed: {err}")))
        .and_then(|result| result);

    let result = report_outcome(
        notifier.as_ref(),
        result,
        &format!("Opportunity moved to {}", to.label()),
        "Could not move the opportunity",
    );

    if result.is_ok() {
        tokio::time::sleep_until(settle_at).await;
    }
    if overlay.clear_generation(generation) {
        log::debug!("Overlay {generation} cleared");
    }

    result
}
