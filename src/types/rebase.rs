use bigdecimal::BigDecimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RebaseAprBody {
    pub rebase_apr: BigDecimal,
}
