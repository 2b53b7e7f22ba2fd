use super::{CastVote, VoteStore};
use crate::domain::{
    decide_vote, requested_state, Arrow, ClientVoteView, ConfirmedVote, VoteDecision, VoteState,
};
use circles_errors::AppError;
use serde::Serialize;
use uuid::Uuid;

/// A click that has been applied optimistically and awaits the store.
#[derive(Debug, Clone)]
pub struct PendingVote {
    ticket: u64,
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub previous: VoteState,
    pub decision: VoteDecision,
    snapshot: ClientVoteView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "view", rename_all = "snake_case")]
pub enum VoteOutcome {
    /// Store accepted the vote, view now shows the authoritative values.
    Confirmed(ClientVoteView),
    /// Store rejected the vote, view is back to its pre-click values.
    RolledBack(ClientVoteView),
    /// Response arrived after the binding stopped caring.
    Ignored,
}

/// Per-item vote state for one viewer: the arrows and the count next to them.
///
/// All vote arithmetic goes through [`decide_vote`]; the binding only records
/// results. One cast may be in flight at a time.
pub struct VoteBinding<'a, S> {
    engine: &'a CastVote<S>,
    user_id: Option<Uuid>,
    item_id: Uuid,
    view: ClientVoteView,
    next_ticket: u64,
    in_flight: Option<u64>,
    mounted: bool,
}

impl<'a, S: VoteStore> VoteBinding<'a, S> {
    pub async fn mount(
        engine: &'a CastVote<S>,
        user_id: Option<Uuid>,
        item_id: Uuid,
        initial_count: i32,
    ) -> Self {
        let user_vote = match user_id {
            Some(uid) => engine.current_state(uid, item_id).await,
            None => VoteState::Neutral,
        };

        Self {
            engine,
            user_id,
            item_id,
            view: ClientVoteView::new(initial_count, user_vote),
            next_ticket: 0,
            in_flight: None,
            mounted: true,
        }
    }

    pub fn view(&self) -> ClientVoteView {
        self.view
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn controls_enabled(&self) -> bool {
        self.mounted && self.user_id.is_some() && self.in_flight.is_none()
    }

    pub fn is_highlighted(&self, arrow: Arrow) -> bool {
        self.view.displayed_user_vote == arrow.state()
    }

    /// Applies the click to the view right away and hands back the work
    /// still owed to the store.
    pub fn click(&mut self, arrow: Arrow) -> Result<PendingVote, AppError> {
        let user_id = self.user_id.ok_or(AppError::Unauthenticated)?;
        if !self.mounted {
            return Err(AppError::Internal("vote binding is unmounted".to_string()));
        }
        if self.in_flight.is_some() {
            return Err(AppError::VoteInFlight);
        }

        let previous = self.view.displayed_user_vote;
        let decision = decide_vote(previous, requested_state(previous, arrow));
        let snapshot = self.view;
        self.view.apply(&decision);

        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);

        Ok(PendingVote {
            ticket: self.next_ticket,
            user_id,
            item_id: self.item_id,
            previous,
            decision,
            snapshot,
        })
    }

    pub fn settle(
        &mut self,
        pending: PendingVote,
        result: Result<ConfirmedVote, AppError>,
    ) -> VoteOutcome {
        if !self.mounted || self.in_flight != Some(pending.ticket) {
            tracing::debug!(item_id = %pending.item_id, "Dropping vote response for stale binding");
            return VoteOutcome::Ignored;
        }
        self.in_flight = None;

        match result {
            Ok(confirmed) => {
                self.view = ClientVoteView::new(confirmed.confirmed_count, confirmed.confirmed_state);
                VoteOutcome::Confirmed(self.view)
            }
            Err(e) => {
                tracing::error!(
                    user_id = %pending.user_id,
                    item_id = %pending.item_id,
                    "Vote failed, rolling back: {}",
                    e
                );
                self.view = pending.snapshot;
                VoteOutcome::RolledBack(self.view)
            }
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.in_flight = None;
    }

    /// Click, persist and reconcile in one go.
    pub async fn cast(&mut self, arrow: Arrow) -> Result<VoteOutcome, AppError> {
        let pending = self.click(arrow)?;
        let result = self
            .engine
            .execute(
                pending.user_id,
                pending.item_id,
                pending.previous,
                pending.decision.new_state,
            )
            .await;
        Ok(self.settle(pending, result))
    }
}
