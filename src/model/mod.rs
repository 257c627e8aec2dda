pub use self::stats::{RawSupply, StatsData, StatsResponse};

mod stats;
