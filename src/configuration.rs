use std::{env, fs, ops::Deref, sync::Arc, time::Duration};

use ethers::types::Address;

use crate::{
    cache::TimedCache,
    cache_keys,
    error::Error,
    handler::StatsService,
    provider::{Rpc, HTTP},
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

pub struct State {
    pub config: Config,
    pub stats: StatsService,
}

impl State {
    pub fn new(config: Config, rpc: Rpc, http: HTTP) -> State {
        let cache_ttl =
            Duration::from_secs(u64::from(config.cache_interval) * 60);
        let stats = StatsService::new(
            Arc::new(rpc),
            Arc::new(http),
            Arc::new(TimedCache::<String>::new()),
            cache_keys::STATS.to_owned(),
            cache_ttl,
        );

        State { config, stats }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub token_address: Address,
    pub ve_address: Address,
    pub multicall_contract: Address,
    pub aux_api_host: String,
    pub cache_interval: u16,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn get_pairs_url(&self) -> String {
        format!("{}/pairs", self.aux_api_host)
    }

    pub fn get_asset_url(&self, address: Address) -> String {
        format!("{}/assets/{:?}", self.aux_api_host, address)
    }

    pub fn get_rebase_apr_url(&self) -> String {
        format!("{}/rebase-apr", self.aux_api_host)
    }
}

pub fn get_configuration() -> Result<Config, Error> {
    let host = env::var("HOST")?;
    let token_address = parse_address(&env::var("TOKEN_ADDRESS")?)?;
    let ve_address = parse_address(&env::var("VE_ADDRESS")?)?;
    let multicall_contract =
        parse_address(&env::var("MULTICALL_CONTRACT")?)?;
    let aux_api_host = env::var("AUX_API_HOST")?;
    let cache_interval = env::var("CACHE_INTERVAL_IN_MINUTES")?.parse()?;

    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;
    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.to_owned())
        .collect::<Vec<String>>();

    let config = Config {
        host,
        token_address,
        ve_address,
        multicall_contract,
        aux_api_host,
        cache_interval,
        server_host,
        port,
        allowed_origins,
    };

    Ok(config)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    let config_string = fs::read_to_string(path)?;
    parse_config_string(config_string);

    Ok(())
}

fn parse_config_string(config: String) {
    let params: Vec<Option<(&str, &str)>> = config
        .split('\n')
        .map(|s| {
            let element = s.find('=');
            if let Some(e) = element {
                return Some(s.split_at(e));
            }
            None
        })
        .map(|value| {
            if let Some((k, v)) = value {
                return Some((k, &v[1..]));
            }
            None
        })
        .collect();

    for (key, value) in params.into_iter().flatten() {
        env::set_var(key, value);
    }
}

fn parse_address(value: &str) -> Result<Address, Error> {
    value.parse::<Address>().map_err(|err| {
        Error::ConfigurationError(format!(
            "invalid address {}: {}",
            value, err
        ))
    })
}
