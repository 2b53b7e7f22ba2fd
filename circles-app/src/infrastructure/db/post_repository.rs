use super::entities::{post, Post};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, post_data: &crate::domain::Post) -> Result<post::Model, DbErr> {
        let active = post::ActiveModel {
            id: Set(post_data.id),
            circle: Set(post_data.circle.clone()),
            title: Set(post_data.title.clone()),
            content: Set(post_data.content.clone()),
            link: Set(post_data.link.clone()),
            user_id: Set(post_data.user_id),
            number_of_votes: Set(post_data.number_of_votes),
            created_at: Set(post_data.created_at),
        };
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<post::Model>, DbErr> {
        Post::find_by_id(id).one(&self.db).await
    }

    pub async fn list(&self, circle: Option<String>) -> Result<Vec<post::Model>, DbErr> {
        Post::find()
            .apply_if(circle, |query, circle| {
                query.filter(post::Column::Circle.eq(circle))
            })
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn vote_count(&self, id: Uuid) -> Result<i32, DbErr> {
        self.find_by_id(id)
            .await?
            .map(|p| p.number_of_votes)
            .ok_or(DbErr::RecordNotFound(format!("post {id}")))
    }

    /// Single `UPDATE .. SET number_of_votes = number_of_votes + $delta`, so
    /// concurrent voters never overwrite each other.
    pub async fn add_votes(&self, id: Uuid, delta: i32) -> Result<i32, DbErr> {
        let updated = Post::update_many()
            .col_expr(
                post::Column::NumberOfVotes,
                Expr::col(post::Column::NumberOfVotes).add(delta),
            )
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;

        updated
            .into_iter()
            .next()
            .map(|p| p.number_of_votes)
            .ok_or(DbErr::RecordNotFound(format!("post {id}")))
    }
}
