use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "DDLINK_LISTEN_ADDR";
pub const ALLDEBRID_API_KEY_ENV: &str = "ALLDEBRID_API_KEY";
pub const ALLDEBRID_BASE_URL_ENV: &str = "ALLDEBRID_BASE_URL";
pub const DLPROTECT_SERVICE_URL_ENV: &str = "DLPROTECT_SERVICE_URL";
pub const DISABLE_REMOTE_DLPROTECT_CACHE_ENV: &str = "DISABLE_REMOTE_DL_PROTECT_CACHE";
pub const REQUEST_TIMEOUT_SECS_ENV: &str = "DDLINK_REQUEST_TIMEOUT_SECS";
pub const MAX_HOPS_ENV: &str = "DDLINK_MAX_HOPS";
pub const LOG_FORMAT_ENV: &str = "DDLINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9117";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ddlink-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Leave unset to run without the debrid service.
    #[arg(long, env = ALLDEBRID_API_KEY_ENV, hide_env_values = true)]
    pub alldebrid_api_key: Option<String>,

    #[arg(long, env = ALLDEBRID_BASE_URL_ENV, default_value = ddlink_debrid::DEFAULT_BASE_URL)]
    pub alldebrid_base_url: String,

    #[arg(
        long,
        env = DLPROTECT_SERVICE_URL_ENV,
        default_value = ddlink_dlprotect::DEFAULT_SERVICE_URL,
    )]
    pub dlprotect_service_url: String,

    #[arg(long, env = DISABLE_REMOTE_DLPROTECT_CACHE_ENV, default_value_t = false)]
    pub disable_remote_dlprotect_cache: bool,

    #[arg(
        long,
        env = REQUEST_TIMEOUT_SECS_ENV,
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
    )]
    pub request_timeout_secs: u64,

    #[arg(long, env = MAX_HOPS_ENV, default_value_t = ddlink_unlock::DEFAULT_MAX_HOPS)]
    pub max_hops: usize,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,
}
