use bigdecimal::{BigDecimal, Zero};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::{helpers::scale_amount, types::PairRecord};

/// Incentives settle weekly; the APR term annualizes one period.
const PERIODS_PER_YEAR: u32 = 52;

/// One batch of raw supply reads. Magnitudes stay unscaled integers with
/// their decimal exponents alongside, so scaling is exact.
#[derive(Debug, Clone)]
pub struct RawSupply {
    pub token_decimals: u32,
    pub lock_decimals: u32,
    pub raw_total_supply: BigInt,
    pub raw_locked_supply: BigInt,
}

/// Derived token-economy metrics, raw reads passed through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsData {
    pub token_decimals: u32,
    pub lock_decimals: u32,
    pub raw_total_supply: BigDecimal,
    pub raw_locked_supply: BigDecimal,
    pub total_supply: BigDecimal,
    pub locked_supply: BigDecimal,
    pub circulating_supply: BigDecimal,
    pub apr: BigDecimal,
    pub market_cap: BigDecimal,
    pub incentive: BigDecimal,
    pub incentive_per_vote: BigDecimal,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub data: StatsData,
}

impl StatsData {
    pub fn compute(
        supply: &RawSupply,
        pairs: &[PairRecord],
        price: &BigDecimal,
        rebase_apr: &BigDecimal,
    ) -> StatsData {
        let total_supply =
            scale_amount(&supply.raw_total_supply, supply.token_decimals);
        let locked_supply =
            scale_amount(&supply.raw_locked_supply, supply.lock_decimals);
        let circulating_supply = &total_supply - &locked_supply;

        // Pairs whose gauge is missing either figure are skipped outright,
        // not counted as zero.
        let mut tbv_sum = BigDecimal::zero();
        let mut votes_sum = BigDecimal::zero();
        for pair in pairs {
            if let Some(gauge) = &pair.gauge {
                if let (Some(tbv), Some(votes)) = (&gauge.tbv, &gauge.votes) {
                    tbv_sum += tbv;
                    votes_sum += votes;
                }
            }
        }

        // Unpriced or unvoted activity leaves the APR at the rebase baseline;
        // the guard doubles as the division-by-zero check.
        let mut apr = rebase_apr.clone();
        let voted_value = &votes_sum * price;
        if voted_value > BigDecimal::zero() {
            apr += (&tbv_sum * BigDecimal::from(PERIODS_PER_YEAR)
                / voted_value)
                * BigDecimal::from(100);
        }

        let incentive_per_vote = if votes_sum > BigDecimal::zero() {
            &tbv_sum / &votes_sum
        } else {
            tbv_sum.clone()
        };

        let market_cap = &total_supply * price;

        StatsData {
            token_decimals: supply.token_decimals,
            lock_decimals: supply.lock_decimals,
            raw_total_supply: BigDecimal::from(
                supply.raw_total_supply.clone(),
            ),
            raw_locked_supply: BigDecimal::from(
                supply.raw_locked_supply.clone(),
            ),
            total_supply,
            locked_supply,
            circulating_supply,
            apr,
            market_cap,
            incentive: tbv_sum,
            incentive_per_vote,
            price: price.clone(),
        }
    }
}
