use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub shipping: ShippingConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            shipping: ShippingConfig::from_env(),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;
    const HOST_VAR: &'static str = "NURSERY_SHIPPING_API_HOST";
    const PORT_VAR: &'static str = "NURSERY_SHIPPING_API_PORT";

    fn from_env() -> Self {
        Self::from_values(env_string(Self::HOST_VAR), env_string(Self::PORT_VAR))
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Self {
        let default_ip = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
        let host_value = host.unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let (bind_ip, display_host) = match host_value.parse::<IpAddr>() {
            Ok(ip) => (ip, host_value),
            Err(err) => {
                tracing::warn!(
                    "Could not parse {} ('{}'): {}. Using {}.",
                    Self::HOST_VAR,
                    host_value,
                    err,
                    Self::DEFAULT_HOST
                );
                (default_ip, Self::DEFAULT_HOST.to_string())
            }
        };

        let port = match port {
            Some(raw) => match raw.parse::<u16>() {
                Ok(value) if value != 0 => value,
                Ok(_) => {
                    tracing::warn!(
                        "{} must not be 0. Using {}.",
                        Self::PORT_VAR,
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
                Err(err) => {
                    tracing::warn!(
                        "Could not parse {} ('{}'): {}. Using {}.",
                        Self::PORT_VAR,
                        raw,
                        err,
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
            },
            None => Self::DEFAULT_PORT,
        };

        Self {
            bind_ip,
            display_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }
}

/// Configuration for package calculation and the startup catalog.
#[derive(Clone, Debug)]
pub struct ShippingConfig {
    catalog_path: Option<PathBuf>,
    default_weight_per_item: f64,
    max_quantity: u64,
}

impl ShippingConfig {
    pub const DEFAULT_WEIGHT_PER_ITEM: f64 = 1.0;
    pub const DEFAULT_MAX_QUANTITY: u64 = 10_000;
    const CATALOG_PATH_VAR: &'static str = "NURSERY_SHIPPING_CATALOG_PATH";
    const ITEM_WEIGHT_VAR: &'static str = "NURSERY_SHIPPING_DEFAULT_ITEM_WEIGHT";
    const MAX_QUANTITY_VAR: &'static str = "NURSERY_SHIPPING_MAX_QUANTITY";

    fn from_env() -> Self {
        Self::from_values(
            env_string(Self::CATALOG_PATH_VAR),
            env_string(Self::ITEM_WEIGHT_VAR),
            env_string(Self::MAX_QUANTITY_VAR),
        )
    }

    fn from_values(
        catalog_path: Option<String>,
        item_weight: Option<String>,
        max_quantity: Option<String>,
    ) -> Self {
        let default_weight_per_item = parse_setting(
            Self::ITEM_WEIGHT_VAR,
            item_weight,
            Self::DEFAULT_WEIGHT_PER_ITEM,
            |value: f64| value >= 0.0 && value.is_finite(),
            "must be a non-negative number",
        );
        let max_quantity = parse_setting(
            Self::MAX_QUANTITY_VAR,
            max_quantity,
            Self::DEFAULT_MAX_QUANTITY,
            |value: u64| value > 0,
            "must be a positive whole number",
        );

        Self {
            catalog_path: catalog_path.map(PathBuf::from),
            default_weight_per_item,
            max_quantity,
        }
    }

    /// JSON file with package drafts to load at startup, if configured.
    pub fn catalog_path(&self) -> Option<&PathBuf> {
        self.catalog_path.as_ref()
    }

    /// Item weight in pounds used when a request does not provide one.
    pub fn default_weight_per_item(&self) -> f64 {
        self.default_weight_per_item
    }

    /// Largest order quantity the calculation endpoint accepts.
    pub fn max_quantity(&self) -> u64 {
        self.max_quantity
    }
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_weight_per_item: Self::DEFAULT_WEIGHT_PER_ITEM,
            max_quantity: Self::DEFAULT_MAX_QUANTITY,
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            tracing::warn!("Access to {} failed: {}. Using default value.", name, err);
            None
        }
    }
}

fn parse_setting<T>(
    var_name: &str,
    raw: Option<String>,
    default: T,
    validator: impl Fn(T) -> bool,
    invalid_hint: &str,
) -> T
where
    T: FromStr + Copy + Display,
    T::Err: Display,
{
    match raw {
        Some(raw) => match raw.parse::<T>() {
            Ok(value) if validator(value) => value,
            Ok(_) => {
                tracing::warn!(
                    "{} contains invalid value '{}': {}. Using {}.",
                    var_name,
                    raw,
                    invalid_hint,
                    default
                );
                default
            }
            Err(err) => {
                tracing::warn!(
                    "Could not parse {} ('{}') as number: {}. Using {}.",
                    var_name,
                    raw,
                    err,
                    default
                );
                default
            }
        },
        None => default,
    }
}
