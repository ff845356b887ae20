pub mod avatar;
pub mod favorite;
pub mod review;
pub mod user;

pub use avatar::AvatarItem;
pub use favorite::{Favorite, NewFavorite};
pub use review::{FeedAuthor, RecentReview, Review, ReviewAuthor, ReviewWithAuthor};
pub use user::{ProfileImageRef, User, UserProfile};
