pub mod memory;

#[cfg(feature = "db")]
pub mod db;

mod backend;

pub use backend::StoreBackend;
