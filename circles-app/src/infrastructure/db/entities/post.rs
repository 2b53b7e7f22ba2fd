use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub circle: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: Option<String>,
    pub link: Option<String>,
    pub user_id: Option<Uuid>,
    pub number_of_votes: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Post {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            circle: m.circle,
            title: m.title,
            content: m.content,
            link: m.link,
            user_id: m.user_id,
            number_of_votes: m.number_of_votes,
            created_at: m.created_at,
        }
    }
}
