//! Process configuration, read once from the environment at startup.

use std::fmt;

use crate::error::Error;

/// Listen address used when `COASTERS_ADDR` is unset.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Startup configuration.
#[derive(Clone)]
pub struct Config {
    /// `host:port` to listen on (`COASTERS_ADDR`)
    pub addr: String,
    /// Password the admin gate expects for user `admin` (`ADMIN_PASSWORD`)
    pub admin_password: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Fails when `ADMIN_PASSWORD` is unset or empty: the service refuses to
    /// start without an admin secret.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Config::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let admin_password = lookup("ADMIN_PASSWORD")
            .filter(|p| !p.is_empty())
            .ok_or(Error::MissingEnv("ADMIN_PASSWORD"))?;

        let addr = lookup("COASTERS_ADDR")
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_owned());

        Ok(Self { addr, admin_password })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}
