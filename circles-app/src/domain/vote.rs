use serde::{Deserialize, Serialize};

/// One user's stance on one item. A missing record reads as `Neutral`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    Up,
    Down,
    #[default]
    Neutral,
}

impl VoteState {
    /// What this state adds to the item's aggregate count.
    pub fn contribution(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            Self::Neutral => 0,
        }
    }

    /// Storage encoding (`vote_type` column).
    pub fn as_value(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            Self::Neutral => 0,
        }
    }

    pub fn from_value(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Up),
            -1 => Some(Self::Down),
            0 => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// The arrow control a user clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrow {
    Up,
    Down,
}

impl Arrow {
    pub fn state(self) -> VoteState {
        match self {
            Self::Up => VoteState::Up,
            Self::Down => VoteState::Down,
        }
    }
}

/// Clicking the active arrow clears the vote, any other click selects that arrow.
pub fn requested_state(previous: VoteState, clicked: Arrow) -> VoteState {
    if clicked.state() == previous {
        VoteState::Neutral
    } else {
        clicked.state()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDecision {
    pub delta: i32,
    pub new_state: VoteState,
}

/// Computes the aggregate delta for moving a user's vote from `previous` to
/// `requested`. Every caller that needs vote arithmetic goes through here.
pub fn decide_vote(previous: VoteState, requested: VoteState) -> VoteDecision {
    VoteDecision {
        delta: requested.contribution() - previous.contribution(),
        new_state: requested,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub user_id: uuid::Uuid,
    pub item_id: uuid::Uuid,
    pub vote_state: VoteState,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl VoteRecord {
    pub fn new(user_id: uuid::Uuid, item_id: uuid::Uuid, vote_state: VoteState) -> Self {
        Self {
            user_id,
            item_id,
            vote_state,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Authoritative values returned by the store after a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedVote {
    pub confirmed_count: i32,
    pub confirmed_state: VoteState,
}
