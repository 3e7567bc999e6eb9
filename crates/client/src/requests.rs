use std::fmt;

use serde::Serialize;

/// Body of `POST /backtest` and `POST /train`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunRequest<'a> {
    pub symbol: &'a str,
    pub interval: &'a str,
    pub limit: u32,
}

impl<'a> RunRequest<'a> {
    pub fn new(symbol: &'a str, interval: &'a str, limit: u32) -> Self {
        Self {
            symbol,
            interval,
            limit,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
