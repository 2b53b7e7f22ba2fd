use crate::domain::VoteState;
use circles_errors::AppError;
use std::future::Future;
use uuid::Uuid;

/// Persistence the vote engine needs. Implementations must apply
/// `increment_aggregate` atomically on the store side.
pub trait VoteStore: Send + Sync {
    /// `None` when the user has never voted on the item.
    fn find_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> impl Future<Output = Result<Option<VoteState>, AppError>> + Send;

    /// Missing records read as `VoteState::Neutral`.
    fn get_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> impl Future<Output = Result<VoteState, AppError>> + Send {
        async move {
            Ok(self
                .find_vote_state(user_id, item_id)
                .await?
                .unwrap_or_default())
        }
    }

    fn upsert_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        state: VoteState,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Deletes the pair's record. A missing record is not an error.
    fn remove_vote_record(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Adds `delta` to the item's counter and returns the new value.
    fn increment_aggregate(
        &self,
        item_id: Uuid,
        delta: i32,
    ) -> impl Future<Output = Result<i32, AppError>> + Send;

    fn aggregate(&self, item_id: Uuid) -> impl Future<Output = Result<i32, AppError>> + Send;

    /// Sum of every stored vote contribution for the item.
    fn recorded_sum(&self, item_id: Uuid) -> impl Future<Output = Result<i32, AppError>> + Send;
}
