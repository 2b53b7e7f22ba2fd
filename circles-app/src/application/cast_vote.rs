use super::VoteStore;
use crate::domain::{decide_vote, requested_state, AggregateAudit, Arrow, ConfirmedVote, VoteState};
use circles_errors::AppError;
use uuid::Uuid;

/// Persists vote casts. Holds no per-item state; callers serialize casts for
/// the same (user, item) pair.
pub struct CastVote<S> {
    store: S,
}

impl<S: VoteStore> CastVote<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current vote for the pair, or `Neutral` if the store can't be read.
    pub async fn current_state(&self, user_id: Uuid, item_id: Uuid) -> VoteState {
        match self.store.get_vote_state(user_id, item_id).await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(%user_id, %item_id, "Failed to load vote state, assuming neutral: {}", e);
                VoteState::Neutral
            }
        }
    }

    /// Casts `requested` over a caller-supplied `previous`.
    pub async fn execute(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        previous: VoteState,
        requested: VoteState,
    ) -> Result<ConfirmedVote, AppError> {
        let had_record = if previous == VoteState::Neutral && requested != previous {
            self.store.find_vote_state(user_id, item_id).await?.is_some()
        } else {
            true
        };
        self.persist(user_id, item_id, previous, requested, had_record)
            .await
    }

    /// Like `execute`, but rejects the cast with `StaleVote` when `previous`
    /// is not what the store holds.
    pub async fn execute_checked(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        previous: VoteState,
        requested: VoteState,
    ) -> Result<ConfirmedVote, AppError> {
        let stored = self.store.find_vote_state(user_id, item_id).await?;
        let current = stored.unwrap_or_default();
        if current != previous {
            tracing::warn!(%user_id, %item_id, ?current, ?previous, "Rejecting stale vote");
            return Err(AppError::StaleVote(format!(
                "stored vote is {current:?}, request assumed {previous:?}"
            )));
        }
        self.persist(user_id, item_id, previous, requested, stored.is_some())
            .await
    }

    /// Reads the stored vote, applies the toggle rule for `clicked` and casts.
    pub async fn cast_for(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        clicked: Arrow,
    ) -> Result<ConfirmedVote, AppError> {
        let stored = self.store.find_vote_state(user_id, item_id).await?;
        let previous = stored.unwrap_or_default();
        self.persist(
            user_id,
            item_id,
            previous,
            requested_state(previous, clicked),
            stored.is_some(),
        )
        .await
    }

    async fn persist(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        previous: VoteState,
        requested: VoteState,
        had_record: bool,
    ) -> Result<ConfirmedVote, AppError> {
        let decision = decide_vote(previous, requested);
        tracing::debug!(
            %user_id,
            %item_id,
            ?previous,
            new_state = ?decision.new_state,
            delta = decision.delta,
            "Casting vote"
        );

        // An unchanged state leaves the record alone; the increment of 0 still
        // returns the current count.
        let moved = decision.new_state != previous;
        if moved {
            if let Err(e) = self
                .store
                .upsert_vote_state(user_id, item_id, decision.new_state)
                .await
            {
                tracing::error!(%user_id, %item_id, "Failed to save vote record: {}", e);
                return Err(e);
            }
        }

        match self.store.increment_aggregate(item_id, decision.delta).await {
            Ok(confirmed_count) => Ok(ConfirmedVote {
                confirmed_count,
                confirmed_state: decision.new_state,
            }),
            Err(e) => {
                tracing::error!(%item_id, delta = decision.delta, "Failed to apply vote delta: {}", e);
                if moved {
                    self.restore(user_id, item_id, previous, had_record).await;
                }
                Err(e)
            }
        }
    }

    /// Puts the record back to match the untouched counter.
    async fn restore(&self, user_id: Uuid, item_id: Uuid, previous: VoteState, had_record: bool) {
        let restored = if had_record {
            self.store.upsert_vote_state(user_id, item_id, previous).await
        } else {
            self.store.remove_vote_record(user_id, item_id).await
        };
        if let Err(e) = restored {
            tracing::error!(
                %user_id,
                %item_id,
                "Failed to restore vote record, aggregate may drift: {}",
                e
            );
        }
    }

    /// Compares the stored counter with the vote records. Reports only.
    pub async fn audit(&self, item_id: Uuid) -> Result<AggregateAudit, AppError> {
        let stored_count = self.store.aggregate(item_id).await?;
        let recorded_sum = self.store.recorded_sum(item_id).await?;
        let audit = AggregateAudit {
            item_id,
            stored_count,
            recorded_sum,
        };

        if !audit.is_consistent() {
            tracing::warn!(
                %item_id,
                stored_count,
                recorded_sum,
                "Aggregate vote count has drifted from vote records"
            );
        }

        Ok(audit)
    }
}
