use super::{store_error, PostRepository, VoteRepository};
use crate::application::VoteStore;
use crate::domain::{NewPost, Post, VoteState};
use circles_errors::AppError;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgStore {
    posts: PostRepository,
    votes: VoteRepository,
}

impl PgStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            posts: PostRepository::new(db.clone()),
            votes: VoteRepository::new(db),
        }
    }

    pub async fn create_post(&self, new_post: NewPost, user_id: Option<Uuid>) -> Result<Post, AppError> {
        let post = Post::new(new_post, user_id);
        self.posts.create(&post).await.map_err(store_error)?;
        Ok(post)
    }

    pub async fn find_post(&self, id: Uuid) -> Result<Option<Post>, AppError> {
        let found = self.posts.find_by_id(id).await.map_err(store_error)?;
        Ok(found.map(Post::from))
    }

    pub async fn list_posts(&self, circle: Option<String>) -> Result<Vec<Post>, AppError> {
        let rows = self.posts.list(circle).await.map_err(store_error)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }
}

fn decode(vote_type: i16) -> Result<VoteState, AppError> {
    VoteState::from_value(vote_type)
        .ok_or_else(|| AppError::Store(format!("invalid vote_type {vote_type}")))
}

impl VoteStore for PgStore {
    async fn find_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<VoteState>, AppError> {
        self.votes
            .find(user_id, item_id)
            .await
            .map_err(store_error)?
            .map(|record| decode(record.vote_type))
            .transpose()
    }

    async fn upsert_vote_state(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        state: VoteState,
    ) -> Result<(), AppError> {
        self.votes
            .upsert(user_id, item_id, state)
            .await
            .map_err(store_error)
    }

    async fn remove_vote_record(&self, user_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        self.votes.delete(user_id, item_id).await.map_err(store_error)
    }

    async fn increment_aggregate(&self, item_id: Uuid, delta: i32) -> Result<i32, AppError> {
        self.posts.add_votes(item_id, delta).await.map_err(store_error)
    }

    async fn aggregate(&self, item_id: Uuid) -> Result<i32, AppError> {
        self.posts.vote_count(item_id).await.map_err(store_error)
    }

    async fn recorded_sum(&self, item_id: Uuid) -> Result<i32, AppError> {
        let records = self.votes.for_post(item_id).await.map_err(store_error)?;
        records.into_iter().try_fold(0, |sum, record| {
            Ok(sum + decode(record.vote_type)?.contribution())
        })
    }
}
