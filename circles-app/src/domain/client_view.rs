use super::{VoteDecision, VoteState};
use serde::{Deserialize, Serialize};

/// What one rendered item currently shows to its viewer. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientVoteView {
    pub displayed_count: i32,
    pub displayed_user_vote: VoteState,
}

impl ClientVoteView {
    pub fn new(displayed_count: i32, displayed_user_vote: VoteState) -> Self {
        Self {
            displayed_count,
            displayed_user_vote,
        }
    }

    pub fn apply(&mut self, decision: &VoteDecision) {
        self.displayed_count += decision.delta;
        self.displayed_user_vote = decision.new_state;
    }
}
