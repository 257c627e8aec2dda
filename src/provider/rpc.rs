use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::{
    contract::{abigen, Multicall},
    providers::{Http, Provider},
    types::U256,
};
use url::Url;

use crate::{
    configuration::Config,
    error::Error,
    handler::SupplyFetcher,
    helpers::{to_big_int, to_decimals},
    model::RawSupply,
};

abigen!(
    Erc20,
    r#"[
        function decimals() external view returns (uint256)
        function totalSupply() external view returns (uint256)
        function balanceOf(address account) external view returns (uint256)
    ]"#
);

#[derive(Debug)]
pub struct Rpc {
    pub config: Config,
    pub client: Arc<Provider<Http>>,
}

impl Rpc {
    pub fn new(config: Config) -> Result<Rpc, Error> {
        let url = Url::parse(&config.host)?;
        let client = Arc::new(Provider::new(Http::new(url)));

        Ok(Rpc { config, client })
    }

    /// The four supply reads go out as one multicall with failures
    /// disallowed, so they land in a single snapshot or not at all.
    async fn batch_supply(&self) -> Result<(U256, U256, U256, U256)> {
        let token = Erc20::new(self.config.token_address, self.client.clone());
        let escrow = Erc20::new(self.config.ve_address, self.client.clone());

        let mut multicall = Multicall::new(
            self.client.clone(),
            Some(self.config.multicall_contract),
        )
        .await
        .context("could not set up the supply multicall")?;

        multicall
            .add_call(token.decimals(), false)
            .add_call(escrow.decimals(), false)
            .add_call(token.total_supply(), false)
            .add_call(token.balance_of(self.config.ve_address), false);

        multicall.call().await.context("supply multicall failed")
    }
}

#[async_trait]
impl SupplyFetcher for Rpc {
    async fn supply(&self) -> Result<RawSupply, Error> {
        let (token_decimals, lock_decimals, raw_total_supply, raw_locked_supply) =
            self.batch_supply()
                .await
                .map_err(|err| Error::FetchError(format!("{err:#}")))?;

        Ok(RawSupply {
            token_decimals: to_decimals(token_decimals)?,
            lock_decimals: to_decimals(lock_decimals)?,
            raw_total_supply: to_big_int(raw_total_supply)?,
            raw_locked_supply: to_big_int(raw_locked_supply)?,
        })
    }
}
