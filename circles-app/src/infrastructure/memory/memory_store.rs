use crate::application::VoteStore;
use crate::domain::{NewPost, Post, VoteRecord, VoteState};
use circles_errors::AppError;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Process-local store. Counter updates happen under the shard lock of the
/// post entry, so concurrent voters never lose an increment.
#[derive(Clone, Default)]
pub struct MemoryStore {
    posts: Arc<DashMap<Uuid, Post>>,
    votes: Arc<DashMap<(Uuid, Uuid), VoteRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_post(&self, new_post: NewPost, user_id: Option<Uuid>) -> Post {
        let post = Post::new(new_post, user_id);
        self.insert_post(post.clone());
        post
    }

    pub fn insert_post(&self, post: Post) {
        self.posts.insert(post.id, post);
    }

    pub fn find_post(&self, id: Uuid) -> Option<Post> {
        self.posts.get(&id).map(|p| p.value().clone())
    }

    pub fn list_posts(&self, circle: Option<&str>) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| circle.map_or(true, |c| p.circle == c))
            .map(|p| p.value().clone())
            .collect()
    }

    pub fn record(&self, user_id: Uuid, item_id: Uuid) -> Option<VoteRecord> {
        self.votes.get(&(user_id, item_id)).map(|r| r.value().clone())
    }

    fn not_found(item_id: Uuid) -> AppError {
        AppError::NotFound(format!("post {item_id}"))
    }
}

impl VoteStore for MemoryStore {
    async fn find_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<VoteState>, AppError> {
        Ok(self.votes.get(&(user_id, item_id)).map(|r| r.vote_state))
    }

    async fn upsert_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        state: VoteState,
    ) -> Result<(), AppError> {
        if !self.posts.contains_key(&item_id) {
            return Err(Self::not_found(item_id));
        }

        let now = chrono::Utc::now();
        self.votes
            .entry((user_id, item_id))
            .and_modify(|r| {
                r.vote_state = state;
                r.updated_at = Some(now);
            })
            .or_insert_with(|| VoteRecord {
                created_at: Some(now),
                updated_at: Some(now),
                ..VoteRecord::new(user_id, item_id, state)
            });
        Ok(())
    }

    async fn remove_vote_record(&self, user_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        self.votes.remove(&(user_id, item_id));
        Ok(())
    }

    async fn increment_aggregate(&self, item_id: Uuid, delta: i32) -> Result<i32, AppError> {
        let mut post = self
            .posts
            .get_mut(&item_id)
            .ok_or_else(|| Self::not_found(item_id))?;
        post.number_of_votes = post.number_of_votes.checked_add(delta).ok_or_else(|| {
            AppError::Store(format!("vote count for post {item_id} out of range"))
        })?;
        Ok(post.number_of_votes)
    }

    async fn aggregate(&self, item_id: Uuid) -> Result<i32, AppError> {
        self.posts
            .get(&item_id)
            .map(|p| p.number_of_votes)
            .ok_or_else(|| Self::not_found(item_id))
    }

    async fn recorded_sum(&self, item_id: Uuid) -> Result<i32, AppError> {
        Ok(self
            .votes
            .iter()
            .filter(|r| r.item_id == item_id)
            .map(|r| r.vote_state.contribution())
            .sum())
    }
}
