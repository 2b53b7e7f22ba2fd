mod cast_vote;
mod vote_binding;
mod vote_store;

#[cfg(test)]
pub(crate) mod testing;

pub use cast_vote::CastVote;
pub use vote_binding::{PendingVote, VoteBinding, VoteOutcome};
pub use vote_store::VoteStore;
