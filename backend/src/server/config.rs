//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use tinylink::inbound::http::session_config::SessionSettings;

/// Everything the server needs besides the handler state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Combine validated session settings with the listener address.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl: ttl,
            bind_addr,
        }
    }
}
