use std::{env, time::Duration};

use cos_common::{helpers::parse_boolean_flag, AssetNames, Secret};
use log::*;

const DEFAULT_COS_HOST: &str = "127.0.0.1";
const DEFAULT_COS_PORT: u16 = 8370;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/chain_orders.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_FEED_BUFFER_SIZE: usize = 100;
const DEFAULT_PUSH_APP_KEY: i64 = 0;
const DEFAULT_PUSH_TYPE: &str = "NOTICE";
const DEFAULT_PUSH_TITLE: &str = "Transfer confirmed";
const DEFAULT_PUSH_INTERVAL: Duration = Duration::from_millis(2000);
const DEFAULT_PUSH_QUEUE_CAPACITY: usize = 100;
const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// Capacity of the in-process confirmation feed
    pub feed_buffer_size: usize,
    /// Apply any outstanding database migrations when the server starts
    pub run_migrations: bool,
    /// Display names for asset ids, used when composing notifications
    pub asset_names: AssetNames,
    pub push: PushConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_COS_HOST.to_string(),
            port: DEFAULT_COS_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            feed_buffer_size: DEFAULT_FEED_BUFFER_SIZE,
            run_migrations: true,
            asset_names: AssetNames::default(),
            push: PushConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("COS_HOST").ok().unwrap_or_else(|| DEFAULT_COS_HOST.into());
        let port = parse_env("COS_PORT", DEFAULT_COS_PORT);
        let database_url = env::var("COS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ COS_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.into()
        });
        let max_connections = parse_env("COS_DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let feed_buffer_size = parse_capacity_env("COS_FEED_BUFFER_SIZE", DEFAULT_FEED_BUFFER_SIZE);
        let run_migrations = parse_boolean_flag(env::var("COS_RUN_MIGRATIONS").ok(), true);
        let asset_names = env::var("COS_ASSET_NAMES")
            .ok()
            .map(|s| {
                s.parse::<AssetNames>().unwrap_or_else(|e| {
                    error!("🪛️ COS_ASSET_NAMES is invalid. {e}. Using the default asset names instead.");
                    AssetNames::default()
                })
            })
            .unwrap_or_default();
        info!("🪛️ {} asset names are configured", asset_names.len());
        let push = PushConfig::from_env_or_default();
        Self { host, port, database_url, max_connections, feed_buffer_size, run_migrations, asset_names, push }
    }
}

//-------------------------------------------------  PushConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct PushConfig {
    /// The push gateway endpoint. When `None`, notifications are only written to the log.
    pub url: Option<String>,
    pub app_key: i64,
    pub access_key: String,
    /// Used to sign gateway requests
    pub secret: Secret<String>,
    /// The notification-type tag sent with every push
    pub push_type: String,
    pub title: String,
    /// At most one notification is dispatched per interval
    pub interval: Duration,
    /// Number of notifications that can wait for dispatch before producers block
    pub queue_capacity: usize,
    pub timeout: Duration,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            url: None,
            app_key: DEFAULT_PUSH_APP_KEY,
            access_key: String::default(),
            secret: Secret::default(),
            push_type: DEFAULT_PUSH_TYPE.to_string(),
            title: DEFAULT_PUSH_TITLE.to_string(),
            interval: DEFAULT_PUSH_INTERVAL,
            queue_capacity: DEFAULT_PUSH_QUEUE_CAPACITY,
            timeout: DEFAULT_PUSH_TIMEOUT,
        }
    }
}

impl PushConfig {
    pub fn from_env_or_default() -> Self {
        let url = env::var("COS_PUSH_URL").ok().filter(|s| !s.trim().is_empty());
        if url.is_none() {
            warn!("🪛️ COS_PUSH_URL is not set. Push notifications will be logged, but not delivered.");
        }
        let app_key = parse_env("COS_PUSH_APP_KEY", DEFAULT_PUSH_APP_KEY);
        let access_key = env::var("COS_PUSH_ACCESS_KEY").ok().unwrap_or_default();
        let secret = Secret::new(env::var("COS_PUSH_SECRET").ok().unwrap_or_default());
        if url.is_some() && (access_key.is_empty() || secret.is_empty()) {
            warn!("🪛️ COS_PUSH_ACCESS_KEY or COS_PUSH_SECRET is not set. The push gateway will probably reject requests.");
        }
        let push_type = env::var("COS_PUSH_TYPE").ok().unwrap_or_else(|| DEFAULT_PUSH_TYPE.into());
        let title = env::var("COS_PUSH_TITLE").ok().unwrap_or_else(|| DEFAULT_PUSH_TITLE.into());
        let interval = Duration::from_millis(parse_env("COS_PUSH_INTERVAL", DEFAULT_PUSH_INTERVAL.as_millis() as u64));
        let interval = if interval.is_zero() {
            warn!("🪛️ COS_PUSH_INTERVAL must be positive. Using the default, {DEFAULT_PUSH_INTERVAL:?}.");
            DEFAULT_PUSH_INTERVAL
        } else {
            interval
        };
        let queue_capacity = parse_capacity_env("COS_PUSH_QUEUE_CAPACITY", DEFAULT_PUSH_QUEUE_CAPACITY);
        let timeout = Duration::from_secs(parse_env("COS_PUSH_TIMEOUT", DEFAULT_PUSH_TIMEOUT.as_secs()));
        Self { url, app_key, access_key, secret, push_type, title, interval, queue_capacity, timeout }
    }
}

/// Reads and parses `name` from the environment. Missing values fall back silently to `default`; values that do not
/// parse are logged and replaced by `default`.
fn parse_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => default,
    }
}

/// Channel capacities must be positive. Zero is logged and replaced by `default`.
fn parse_capacity_env(name: &str, default: usize) -> usize {
    match parse_env(name, default) {
        0 => {
            warn!("🪛️ {name} must be positive. Using the default, {default}.");
            default
        },
        n => n,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8370);
        assert_eq!(config.push.interval, Duration::from_secs(2));
        assert_eq!(config.push.queue_capacity, 100);
        assert_eq!(config.push.push_type, "NOTICE");
        assert!(config.push.url.is_none());
        assert!(config.run_migrations);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        env::set_var("COS_TEST_ONLY_PORT", "not-a-port");
        assert_eq!(parse_env("COS_TEST_ONLY_PORT", 1234u16), 1234);
        env::set_var("COS_TEST_ONLY_PORT", " 4321 ");
        assert_eq!(parse_env("COS_TEST_ONLY_PORT", 1234u16), 4321);
        assert_eq!(parse_env("COS_TEST_ONLY_UNSET", 99usize), 99);
    }

    #[test]
    fn zero_capacities_are_rejected() {
        env::set_var("COS_TEST_ONLY_CAPACITY", "0");
        assert_eq!(parse_capacity_env("COS_TEST_ONLY_CAPACITY", 100), 100);
        env::set_var("COS_TEST_ONLY_CAPACITY", "16");
        assert_eq!(parse_capacity_env("COS_TEST_ONLY_CAPACITY", 100), 16);
        assert_eq!(parse_capacity_env("COS_TEST_ONLY_CAPACITY_UNSET", 100), 100);
    }
}
