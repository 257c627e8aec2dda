use anyhow::{Context, Result};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::get;
use tracing::debug;

use crate::{
    configuration::Config,
    error::Error,
    handler::AuxiliaryData,
    types::{AssetBody, PairRecord, PairsBody, RebaseAprBody},
};

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
}

impl HTTP {
    pub fn new(config: Config) -> Self {
        HTTP { config }
    }

    pub async fn get_pairs(&self) -> Result<Vec<PairRecord>> {
        let url = self.config.get_pairs_url();
        debug!("{}", &url);
        let json = get(&url)
            .await
            .context("pairs request failed")?
            .json::<PairsBody>()
            .await
            .context("malformed pairs payload")?;

        Ok(json.data)
    }

    pub async fn get_token_price(&self) -> Result<BigDecimal> {
        let url = self.config.get_asset_url(self.config.token_address);
        debug!("{}", &url);
        let json = get(&url)
            .await
            .context("asset request failed")?
            .json::<AssetBody>()
            .await
            .context("malformed asset payload")?;

        Ok(json.data.price)
    }

    pub async fn get_rebase_apr(&self) -> Result<BigDecimal> {
        let url = self.config.get_rebase_apr_url();
        debug!("{}", &url);
        let json = get(&url)
            .await
            .context("rebase apr request failed")?
            .json::<RebaseAprBody>()
            .await
            .context("malformed rebase apr payload")?;

        Ok(json.rebase_apr)
    }
}

#[async_trait]
impl AuxiliaryData for HTTP {
    async fn pairs(&self) -> Result<Vec<PairRecord>, Error> {
        self.get_pairs()
            .await
            .map_err(|err| Error::AuxiliaryDataError(format!("{err:#}")))
    }

    async fn reference_price(&self) -> Result<BigDecimal, Error> {
        self.get_token_price()
            .await
            .map_err(|err| Error::AuxiliaryDataError(format!("{err:#}")))
    }

    async fn baseline_rebase_apr(&self) -> Result<BigDecimal, Error> {
        self.get_rebase_apr()
            .await
            .map_err(|err| Error::AuxiliaryDataError(format!("{err:#}")))
    }
}
