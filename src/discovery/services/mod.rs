//! Application services for discovery scanning, caching, and matching.

mod cache;
mod matcher;
mod prober;

pub use cache::{DEFAULT_CACHE_TTL, DiscoveryCache};
pub use matcher::{
    DEFAULT_MIN_SHARED_TOKENS, MatchPolicy, MatchStrategy, ModelMatch, ModelMatcher,
};
pub use prober::PortScanProber;
