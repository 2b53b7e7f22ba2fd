use super::entities::{vote, Vote};
use crate::domain::VoteState;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<vote::Model>, DbErr> {
        Vote::find_by_id((user_id, post_id)).one(&self.db).await
    }

    pub async fn upsert(&self, user_id: Uuid, post_id: Uuid, state: VoteState) -> Result<(), DbErr> {
        let now = chrono::Utc::now();
        let active = vote::ActiveModel {
            user_id: Set(user_id),
            post_id: Set(post_id),
            vote_type: Set(state.as_value()),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        Vote::insert(active)
            .on_conflict(
                OnConflict::columns([vote::Column::UserId, vote::Column::PostId])
                    .update_columns([vote::Column::VoteType, vote::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), DbErr> {
        Vote::delete_by_id((user_id, post_id)).exec(&self.db).await?;
        Ok(())
    }

    pub async fn for_post(&self, post_id: Uuid) -> Result<Vec<vote::Model>, DbErr> {
        Vote::find()
            .filter(vote::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
    }
}
