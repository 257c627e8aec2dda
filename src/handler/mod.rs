pub use self::stats::{AuxiliaryData, StatsService, SupplyFetcher};

mod stats;
