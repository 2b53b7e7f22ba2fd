pub mod post;
pub mod vote;

pub use post::Entity as Post;
pub use vote::Entity as Vote;
