use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    InvalidBaseUrl { url: String, reason: String },
    UnsupportedScheme(String),
    Build(reqwest::Error),
    Transport(reqwest::Error),
    /// The backend answered, but the body was not JSON.
    Decode {
        status: u16,
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Decode { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::InvalidBaseUrl { .. } | Self::UnsupportedScheme(_) | Self::Build(_) => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, reason } => {
                write!(f, "backend base url {url:?} is not a valid url: {reason}")
            }
            Self::UnsupportedScheme(scheme) => {
                write!(f, "backend base url scheme must be http or https, got {scheme:?}")
            }
            Self::Build(err) => write!(f, "could not build http client: {err}"),
            Self::Transport(err) => write!(f, "backend request failed: {err}"),
            Self::Decode { status, source } => {
                write!(f, "backend returned a non-json body (status {status}): {source}")
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl { .. } => None,
            Self::UnsupportedScheme(_) => None,
            Self::Build(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}
