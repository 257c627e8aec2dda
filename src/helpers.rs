use std::str::FromStr;

use bigdecimal::BigDecimal;
use ethers::types::U256;
use num_bigint::BigInt;

use crate::error::Error;

/// Scale a raw on-chain magnitude by a decimal exponent, exactly.
/// `raw = 1000 * 10^18, decimals = 18` reads back as `1000`.
pub fn scale_amount(raw: &BigInt, decimals: u32) -> BigDecimal {
    BigDecimal::new(raw.clone(), i64::from(decimals)).normalized()
}

/// Narrow a fetched `decimals()` word to a decimal count.
pub fn to_decimals(value: U256) -> Result<u32, Error> {
    if value > U256::from(u32::MAX) {
        return Err(Error::FetchError(format!(
            "decimals out of range: {}",
            value
        )));
    }
    Ok(value.low_u32())
}

/// Convert a raw `uint256` word into an arbitrary-precision integer.
pub fn to_big_int(value: U256) -> Result<BigInt, Error> {
    Ok(BigInt::from_str(&value.to_string())?)
}
