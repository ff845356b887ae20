pub mod avatars;
pub mod favorites;
pub mod manager;
pub mod models;
pub mod reviews;
pub mod seed;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
