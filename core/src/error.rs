/*
 * error.rs
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

//! Client errors: transport, TLS and configuration failures.
//!
//! A server saying no (`-ERR`, `5xx`) is not an error here; it comes back as a
//! [`Reply`](crate::protocol::Reply) whose status is negative.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Failure that ends a POP3 or SMTP session.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("tls error: {0}")]
    Tls(String),

    #[error("invalid host name: {0}")]
    InvalidHost(String),

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("no reply within {}s", .0.as_secs_f32())]
    Timeout(Duration),

    /// Argument would smuggle a line break into the command.
    #[error("invalid command argument: {0:?}")]
    InvalidCommand(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<rustls::Error> for ClientError {
    fn from(e: rustls::Error) -> Self {
        Self::Tls(e.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
