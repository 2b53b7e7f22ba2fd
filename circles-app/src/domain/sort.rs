use super::Post;
use chrono::{DateTime, Duration, Utc};
use circles_errors::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const HOT_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Hot,
    New,
    Top,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(Self::Hot),
            "new" => Ok(Self::New),
            "top" => Ok(Self::Top),
            other => Err(AppError::InvalidRequest(format!("unknown sort order: {other}"))),
        }
    }
}

/// Orders a listing. `Hot` only keeps posts from the last day.
pub fn sort_posts(mut posts: Vec<Post>, order: SortOrder, now: DateTime<Utc>) -> Vec<Post> {
    match order {
        SortOrder::Hot => {
            let cutoff = now - Duration::hours(HOT_WINDOW_HOURS);
            posts.retain(|p| p.created_at > cutoff);
            posts.sort_by(|a, b| b.number_of_votes.cmp(&a.number_of_votes));
        }
        SortOrder::New => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Top => posts.sort_by(|a, b| b.number_of_votes.cmp(&a.number_of_votes)),
    }
    posts
}
