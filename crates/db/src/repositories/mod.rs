//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod advertisement_repo;
pub mod artist_group_repo;
pub mod artist_repo;
pub mod authority_repo;
pub mod favorite_repo;
pub mod like_repo;
pub mod notification_repo;
pub mod schedule_repo;
pub mod session_repo;
pub mod user_repo;

pub use advertisement_repo::AdvertisementRepo;
pub use artist_group_repo::ArtistGroupRepo;
pub use artist_repo::ArtistRepo;
pub use authority_repo::AuthorityRepo;
pub use favorite_repo::FavoriteRepo;
pub use like_repo::LikeRepo;
pub use notification_repo::NotificationRepo;
pub use schedule_repo::ScheduleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
