//! Domain models for users and their profiles
//!
//! Ids are checked only for emptiness; search text is passed through as
//! given. Rejected input returns `ValidationError`, not panic.

pub mod patch;
pub mod profile;
pub mod search;
pub mod status;
pub mod user_id;

pub use patch::Patch;
pub use profile::{
    DeleteAck, FullUserProfile, NewProfile, ProfileDetails, ProfilePatch, ProfileSearchHit,
    ProfileSummary, User, UserProfile,
};
pub use search::{SearchQuery, SEARCH_LIMIT};
pub use status::AvailabilityStatus;
pub use user_id::UserId;
