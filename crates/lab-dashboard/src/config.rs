use std::{
    env, fmt,
    net::{AddrParseError, SocketAddr},
};

use client::{validate_base_url, ClientError, DEFAULT_API_BASE};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

const ENV_LISTEN_ADDR: &str = "LAB_SERVER_ADDR";
const ENV_API_BASE: &str = "LAB_API_BASE";

/// Resolved once at startup and never changed afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub api_base: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidListenAddr(AddrParseError),
    InvalidApiBase(ClientError),
    NonUnicodeListenAddr,
    NonUnicodeApiBase,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidListenAddr(err) => {
                write!(f, "{ENV_LISTEN_ADDR} is not a valid socket address: {err}")
            }
            Self::InvalidApiBase(err) => {
                write!(f, "{ENV_API_BASE} is not a usable backend url: {err}")
            }
            Self::NonUnicodeListenAddr => {
                write!(f, "{ENV_LISTEN_ADDR} contains non-unicode data")
            }
            Self::NonUnicodeApiBase => {
                write!(f, "{ENV_API_BASE} contains non-unicode data")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidListenAddr(err) => Some(err),
            Self::InvalidApiBase(err) => Some(err),
            Self::NonUnicodeListenAddr => None,
            Self::NonUnicodeApiBase => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match env::var(ENV_LISTEN_ADDR) {
            Ok(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            Err(env::VarError::NotPresent) => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(ConfigError::InvalidListenAddr)?,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeListenAddr);
            }
        };

        let api_base = match env::var(ENV_API_BASE) {
            Ok(value) => validate_base_url(&value).map_err(ConfigError::InvalidApiBase)?,
            Err(env::VarError::NotPresent) => DEFAULT_API_BASE.to_owned(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeApiBase);
            }
        };

        Ok(Self {
            listen_addr,
            api_base,
        })
    }
}
