//! Content-addressed result cache shared across sessions.

pub mod cache;
pub mod error;
pub mod key;
pub mod snapshot;

pub use cache::{CacheStats, ResultCache};
pub use error::CacheError;
pub use key::{CacheKey, CacheKeyBuilder};
pub use snapshot::SnapshotHeader;
