//! Centralized cache key constants
//!
//! All cache keys used by the stats service are defined here so the
//! controllers and the service never drift apart on key names.

pub const STATS: &str = "stats:json";
