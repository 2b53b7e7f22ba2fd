use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: uuid::Uuid,
    pub circle: String,
    pub title: String,
    pub content: Option<String>,
    pub link: Option<String>,
    pub user_id: Option<uuid::Uuid>,
    pub number_of_votes: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Post {
    pub fn new(new_post: NewPost, user_id: Option<uuid::Uuid>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            circle: new_post.circle,
            title: new_post.title,
            content: new_post.content,
            link: new_post.link,
            user_id,
            number_of_votes: 0,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Submission payload for a link or text post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub circle: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}
