mod audit;
mod client_view;
mod post;
mod sort;
mod vote;

pub use audit::AggregateAudit;
pub use client_view::ClientVoteView;
pub use post::{NewPost, Post};
pub use sort::{sort_posts, SortOrder};
pub use vote::{decide_vote, requested_state, Arrow, ConfirmedVote, VoteDecision, VoteRecord, VoteState};
