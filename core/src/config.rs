/*
 * config.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Courrier, a POP3 and SMTP mail client.
 *
 * Courrier is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Courrier is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Courrier.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Session configuration: server address, credentials, timeouts and framing limits.
//!
//! One explicit structure per protocol, built once and handed to the session's
//! `connect`. Every field carries a serde default so a partial TOML file (or none
//! at all) still yields a usable configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Largest reply line kept, in bytes. Longer lines are truncated.
pub const DEFAULT_MAX_LINE: usize = 1024;

/// Default sentinel phrase used to locate a retrieved message body.
pub const DEFAULT_BODY_SENTINEL: &str = "Hello World!";

/// Both protocols, as read from a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub pop3: Pop3Config,

    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl ClientConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }
}

/// POP3 retrieval session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pop3Config {
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port. `None` (or 0) picks 10110, or 10995 when `secure`.
    #[serde(default)]
    pub port: Option<u16>,

    /// Implicit TLS on connect.
    #[serde(default)]
    pub secure: bool,

    #[serde(default = "default_pop3_login")]
    pub login: String,

    #[serde(default = "default_pop3_login")]
    pub password: String,

    /// Per-reply read timeout. POP3 waits forever by default.
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,

    /// Bound on the wait for the server greeting after connect.
    #[serde(default = "default_greeting_timeout")]
    pub greeting_timeout_secs: Option<u64>,

    #[serde(default = "default_max_line")]
    pub max_line: usize,

    /// Phrase searched for when locating the body of a retrieved message.
    #[serde(default = "default_body_sentinel")]
    pub body_sentinel: String,
}

impl Pop3Config {
    pub const PORT: u16 = 10110;
    pub const PORT_SECURE: u16 = 10995;

    pub fn new(host: impl Into<String>, port: u16, secure: bool) -> Self {
        Self {
            host: host.into(),
            port: Some(port),
            secure,
            ..Self::default()
        }
    }

    pub fn port(&self) -> u16 {
        resolve_port(self.port, self.secure, Self::PORT, Self::PORT_SECURE)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    pub fn greeting_timeout(&self) -> Option<Duration> {
        self.greeting_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Pop3Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            secure: false,
            login: default_pop3_login(),
            password: default_pop3_login(),
            read_timeout_secs: None,
            greeting_timeout_secs: default_greeting_timeout(),
            max_line: default_max_line(),
            body_sentinel: default_body_sentinel(),
        }
    }
}

/// SMTP submission session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port. `None` (or 0) picks 10025, or 10465 when `secure`.
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub secure: bool,

    /// Domain announced in EHLO.
    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default = "default_smtp_login")]
    pub login: String,

    #[serde(default = "default_smtp_login")]
    pub password: String,

    /// Applies to connect, the TLS handshake and every reply.
    #[serde(default = "default_smtp_timeout")]
    pub read_timeout_secs: Option<u64>,

    #[serde(default = "default_max_line")]
    pub max_line: usize,

    /// Encode AUTH PLAIN as `" login password"` (space separated) instead of
    /// the RFC 4616 NUL-separated form. Only for servers that expect it.
    #[serde(default)]
    pub legacy_auth_plain: bool,
}

impl SmtpConfig {
    pub const PORT: u16 = 10025;
    pub const PORT_SECURE: u16 = 10465;

    pub fn new(host: impl Into<String>, port: u16, secure: bool) -> Self {
        Self {
            host: host.into(),
            port: Some(port),
            secure,
            ..Self::default()
        }
    }

    pub fn port(&self) -> u16 {
        resolve_port(self.port, self.secure, Self::PORT, Self::PORT_SECURE)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            secure: false,
            domain: default_domain(),
            login: default_smtp_login(),
            password: default_smtp_login(),
            read_timeout_secs: default_smtp_timeout(),
            max_line: default_max_line(),
            legacy_auth_plain: false,
        }
    }
}

fn resolve_port(port: Option<u16>, secure: bool, plain: u16, tls: u16) -> u16 {
    match port {
        Some(p) if p != 0 => p,
        _ if secure => tls,
        _ => plain,
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_domain() -> String {
    "pouet.com".to_string()
}

fn default_pop3_login() -> String {
    "tutu".to_string()
}

fn default_smtp_login() -> String {
    "toto".to_string()
}

fn default_smtp_timeout() -> Option<u64> {
    Some(2)
}

fn default_greeting_timeout() -> Option<u64> {
    Some(30)
}

fn default_max_line() -> usize {
    DEFAULT_MAX_LINE
}

fn default_body_sentinel() -> String {
    DEFAULT_BODY_SENTINEL.to_string()
}
