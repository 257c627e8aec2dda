use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use futures::try_join;
use tracing::debug;

use crate::{
    cache::CacheStore,
    error::Error,
    model::{RawSupply, StatsData, StatsResponse},
    types::PairRecord,
};

/// One batched set of supply reads. The batch is the unit of consistency:
/// implementations return all four values from a single snapshot or fail
/// the whole fetch.
#[async_trait]
pub trait SupplyFetcher: Send + Sync {
    async fn supply(&self) -> Result<RawSupply, Error>;
}

/// Externally computed aggregates consumed read-only during a recompute.
#[async_trait]
pub trait AuxiliaryData: Send + Sync {
    async fn pairs(&self) -> Result<Vec<PairRecord>, Error>;

    async fn reference_price(&self) -> Result<BigDecimal, Error>;

    async fn baseline_rebase_apr(&self) -> Result<BigDecimal, Error>;
}

/// Cache-aside orchestrator for the stats payload. Sole writer of its key.
pub struct StatsService {
    fetcher: Arc<dyn SupplyFetcher>,
    auxiliary: Arc<dyn AuxiliaryData>,
    cache: Arc<dyn CacheStore>,
    cache_key: String,
    cache_ttl: Duration,
}

impl StatsService {
    pub fn new(
        fetcher: Arc<dyn SupplyFetcher>,
        auxiliary: Arc<dyn AuxiliaryData>,
        cache: Arc<dyn CacheStore>,
        cache_key: String,
        cache_ttl: Duration,
    ) -> StatsService {
        StatsService {
            fetcher,
            auxiliary,
            cache,
            cache_key,
            cache_ttl,
        }
    }

    /// Serve the cached payload if a live entry exists; recompute otherwise.
    /// The fast path returns the stored payload verbatim and never touches
    /// the providers.
    pub async fn stats(&self) -> Result<String, Error> {
        if let Some(payload) = self.cache.get(&self.cache_key).await {
            return Ok(payload);
        }

        self.recache().await
    }

    /// Fetch, derive, cache and return a fresh payload. The batched supply
    /// reads and the auxiliary reads run concurrently; the cache write only
    /// happens once the full mapping is built, so a failed recompute leaves
    /// the store untouched.
    pub async fn recache(&self) -> Result<String, Error> {
        let (supply, pairs, price, rebase_apr) = try_join!(
            self.fetcher.supply(),
            self.auxiliary.pairs(),
            self.auxiliary.reference_price(),
            self.auxiliary.baseline_rebase_apr(),
        )?;

        let data = StatsData::compute(&supply, &pairs, &price, &rebase_apr);
        let payload = serde_json::to_string(&StatsResponse { data })?;

        self.cache
            .set(&self.cache_key, payload.clone(), self.cache_ttl)
            .await;
        debug!("Cache updated for {}", self.cache_key);

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use num_bigint::BigInt;

    use super::*;
    use crate::types::GaugeRecord;

    struct StaticFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StaticFetcher {
        fn new(fail: bool) -> Self {
            StaticFetcher {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl SupplyFetcher for StaticFetcher {
        async fn supply(&self) -> Result<RawSupply, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::FetchError(String::from(
                    "supply multicall failed",
                )));
            }
            Ok(RawSupply {
                token_decimals: 18,
                lock_decimals: 18,
                raw_total_supply: BigInt::from_str(
                    "1000000000000000000000",
                )
                .unwrap(),
                raw_locked_supply: BigInt::from_str(
                    "400000000000000000000",
                )
                .unwrap(),
            })
        }
    }

    struct StaticAuxiliary;

    #[async_trait]
    impl AuxiliaryData for StaticAuxiliary {
        async fn pairs(&self) -> Result<Vec<PairRecord>, Error> {
            Ok(vec![PairRecord {
                gauge: Some(GaugeRecord {
                    tbv: Some(BigDecimal::from(100)),
                    votes: Some(BigDecimal::from(50)),
                }),
            }])
        }

        async fn reference_price(&self) -> Result<BigDecimal, Error> {
            Ok(BigDecimal::from(2))
        }

        async fn baseline_rebase_apr(&self) -> Result<BigDecimal, Error> {
            Ok(BigDecimal::from_str("0.05").unwrap())
        }
    }

    #[derive(Default)]
    struct RecordingCache {
        entries: Mutex<HashMap<String, String>>,
        sets: Mutex<Vec<(String, String, Duration)>>,
    }

    #[async_trait]
    impl CacheStore for RecordingCache {
        async fn get(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        async fn set(&self, key: &str, payload: String, ttl: Duration) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_owned(), payload.clone());
            self.sets.lock().unwrap().push((key.to_owned(), payload, ttl));
        }
    }

    fn service(
        fail: bool,
    ) -> (StatsService, Arc<StaticFetcher>, Arc<RecordingCache>) {
        let fetcher = Arc::new(StaticFetcher::new(fail));
        let cache = Arc::new(RecordingCache::default());
        let service = StatsService::new(
            fetcher.clone(),
            Arc::new(StaticAuxiliary),
            cache.clone(),
            String::from("stats:json"),
            Duration::from_secs(300),
        );
        (service, fetcher, cache)
    }

    #[tokio::test]
    async fn live_entry_is_served_without_fetching() {
        let (service, fetcher, cache) = service(false);
        cache.entries.lock().unwrap().insert(
            String::from("stats:json"),
            String::from(r#"{"data":{"total_supply":"1"}}"#),
        );

        let payload = service.stats().await.unwrap();

        assert_eq!(payload, r#"{"data":{"total_supply":"1"}}"#);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(cache.sets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_entry_triggers_a_single_recompute() {
        let (service, fetcher, cache) = service(false);

        let payload = service.stats().await.unwrap();

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        let sets = cache.sets.lock().unwrap();
        assert_eq!(sets.len(), 1);
        let (key, stored, ttl) = &sets[0];
        assert_eq!(key, "stats:json");
        assert_eq!(stored, &payload);
        assert_eq!(*ttl, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn recomputed_payload_carries_the_derived_metrics() {
        let (service, _fetcher, _cache) = service(false);

        let payload = service.stats().await.unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&payload).unwrap();

        assert_eq!(value["data"]["total_supply"], "1000");
        assert_eq!(value["data"]["locked_supply"], "400");
        assert_eq!(value["data"]["circulating_supply"], "600");
        assert_eq!(value["data"]["market_cap"], "2000");
        assert_eq!(value["data"]["incentive"], "100");
        assert_eq!(value["data"]["incentive_per_vote"], "2");
        assert_eq!(value["data"]["apr"], "5200.05");
    }

    #[tokio::test]
    async fn subsequent_reads_hit_the_freshly_written_entry() {
        let (service, fetcher, _cache) = service(false);

        let first = service.stats().await.unwrap();
        let second = service.stats().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_the_cache_untouched() {
        let (service, fetcher, cache) = service(true);

        let err = service.stats().await.unwrap_err();

        assert!(matches!(err, Error::FetchError(_)));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(cache.sets.lock().unwrap().is_empty());
        assert!(cache.entries.lock().unwrap().is_empty());
    }
}
