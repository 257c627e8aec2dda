use bigdecimal::BigDecimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PairsBody {
    pub data: Vec<PairRecord>,
}

/// Trading pair record as served by the pairs aggregate. Only the gauge
/// figures are read here; everything else the upstream attaches is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairRecord {
    #[serde(default)]
    pub gauge: Option<GaugeRecord>,
}

/// Incentive figures attached to a pair's gauge for the current voting
/// period. Either field may be absent while the gauge is warming up.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GaugeRecord {
    #[serde(default)]
    pub tbv: Option<BigDecimal>,
    #[serde(default)]
    pub votes: Option<BigDecimal>,
}
