//! Domain models exchanged with the backend.
//!
//! Unknown fields are kept where the backend schema is open-ended so that
//! callers can still reach them without a client release.

mod account;
mod collection_point;
mod collection_type;

pub use account::UserProfile;
pub use collection_point::{CollectionPoint, PointStatus, StatusUpdate};
pub use collection_type::{CollectionType, NewCollectionType};
