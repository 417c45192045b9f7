//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. None of them writes `relations`,
//! counter columns, or `deleted_at`: those belong to the toggle engine and
//! the lifecycle module respectively.

pub mod blob_release_repo;
pub mod comment_repo;
pub mod playlist_repo;
pub mod relation_repo;
pub mod tweet_repo;
pub mod user_repo;
pub mod video_repo;

pub use blob_release_repo::BlobReleaseRepo;
pub use comment_repo::CommentRepo;
pub use playlist_repo::PlaylistRepo;
pub use relation_repo::RelationRepo;
pub use tweet_repo::TweetRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
