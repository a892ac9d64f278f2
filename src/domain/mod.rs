//! Domain value objects and types.
//!
//! Type-safe wrappers for user IDs, canonical phone numbers, and region
//! hints. These value objects validate at construction time so invalid data
//! cannot be represented past the edges of the system.

pub mod errors;
pub mod phone;
pub mod region;
pub mod user_id;

pub use errors::ValidationError;
pub use phone::CanonicalPhoneNumber;
pub use region::RegionCode;
pub use user_id::UserId;
