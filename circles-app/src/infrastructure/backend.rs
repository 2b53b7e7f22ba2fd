use super::memory::MemoryStore;
use crate::application::VoteStore;
use crate::domain::{NewPost, Post, VoteState};
use circles_errors::AppError;
use uuid::Uuid;

#[cfg(feature = "db")]
use super::db::PgStore;

/// The store selected at startup.
#[derive(Clone)]
pub enum StoreBackend {
    Memory(MemoryStore),
    #[cfg(feature = "db")]
    Postgres(PgStore),
}

impl StoreBackend {
    pub async fn create_post(&self, new_post: NewPost, user_id: Option<Uuid>) -> Result<Post, AppError> {
        match self {
            Self::Memory(store) => Ok(store.create_post(new_post, user_id)),
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.create_post(new_post, user_id).await,
        }
    }

    pub async fn find_post(&self, id: Uuid) -> Result<Post, AppError> {
        let found = match self {
            Self::Memory(store) => store.find_post(id),
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.find_post(id).await?,
        };
        found.ok_or_else(|| AppError::NotFound(format!("post {id}")))
    }

    pub async fn list_posts(&self, circle: Option<String>) -> Result<Vec<Post>, AppError> {
        match self {
            Self::Memory(store) => Ok(store.list_posts(circle.as_deref())),
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.list_posts(circle).await,
        }
    }
}

impl VoteStore for StoreBackend {
    async fn find_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<VoteState>, AppError> {
        match self {
            Self::Memory(store) => store.find_vote_state(user_id, item_id).await,
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.find_vote_state(user_id, item_id).await,
        }
    }

    async fn upsert_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        state: VoteState,
    ) -> Result<(), AppError> {
        match self {
            Self::Memory(store) => store.upsert_vote_state(user_id, item_id, state).await,
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.upsert_vote_state(user_id, item_id, state).await,
        }
    }

    async fn remove_vote_record(&self, user_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        match self {
            Self::Memory(store) => store.remove_vote_record(user_id, item_id).await,
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.remove_vote_record(user_id, item_id).await,
        }
    }

    async fn increment_aggregate(&self, item_id: Uuid, delta: i32) -> Result<i32, AppError> {
        match self {
            Self::Memory(store) => store.increment_aggregate(item_id, delta).await,
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.increment_aggregate(item_id, delta).await,
        }
    }

    async fn aggregate(&self, item_id: Uuid) -> Result<i32, AppError> {
        match self {
            Self::Memory(store) => store.aggregate(item_id).await,
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.aggregate(item_id).await,
        }
    }

    async fn recorded_sum(&self, item_id: Uuid) -> Result<i32, AppError> {
        match self {
            Self::Memory(store) => store.recorded_sum(item_id).await,
            #[cfg(feature = "db")]
            Self::Postgres(store) => store.recorded_sum(item_id).await,
        }
    }
}
