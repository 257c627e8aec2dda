use bigdecimal::BigDecimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssetBody {
    pub data: AssetRecord,
}

/// Token record as served by the assets aggregate; only the price is read.
#[derive(Debug, Deserialize)]
pub struct AssetRecord {
    pub price: BigDecimal,
}
