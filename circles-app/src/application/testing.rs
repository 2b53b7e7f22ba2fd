use super::VoteStore;
use crate::domain::{NewPost, Post, VoteState};
use crate::infrastructure::memory::MemoryStore;
use circles_errors::AppError;
use uuid::Uuid;

/// A memory store holding one post that already has `count` votes.
pub fn seeded_store(count: i32) -> (MemoryStore, Uuid) {
    let store = MemoryStore::new();
    let mut post = Post::new(
        NewPost {
            circle: "rust".to_string(),
            title: "Borrow checker appreciation thread".to_string(),
            content: Some("It was right all along.".to_string()),
            link: None,
        },
        None,
    );
    post.number_of_votes = count;
    let id = post.id;
    store.insert_post(post);
    (store, id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Read,
    Upsert,
    Increment,
}

/// Wraps a memory store and fails one kind of call.
pub struct FlakyStore {
    inner: MemoryStore,
    fail_on: FailOn,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore, fail_on: FailOn) -> Self {
        Self { inner, fail_on }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn injected(&self, op: FailOn) -> Result<(), AppError> {
        if self.fail_on == op {
            Err(AppError::Store(format!("injected {op:?} failure")))
        } else {
            Ok(())
        }
    }
}

impl VoteStore for FlakyStore {
    async fn find_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<VoteState>, AppError> {
        self.injected(FailOn::Read)?;
        self.inner.find_vote_state(user_id, item_id).await
    }

    async fn upsert_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        state: VoteState,
    ) -> Result<(), AppError> {
        self.injected(FailOn::Upsert)?;
        self.inner.upsert_vote_state(user_id, item_id, state).await
    }

    async fn remove_vote_record(&self, user_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        self.inner.remove_vote_record(user_id, item_id).await
    }

    async fn increment_aggregate(&self, item_id: Uuid, delta: i32) -> Result<i32, AppError> {
        self.injected(FailOn::Increment)?;
        self.inner.increment_aggregate(item_id, delta).await
    }

    async fn aggregate(&self, item_id: Uuid) -> Result<i32, AppError> {
        self.inner.aggregate(item_id).await
    }

    async fn recorded_sum(&self, item_id: Uuid) -> Result<i32, AppError> {
        self.inner.recorded_sum(item_id).await
    }
}
